use crate::render::{frame_begin, frame_end, Frame, Renderer};
use std::io::Write;

/// Two grey pixels per cell: the upper half block takes the top pixel as
/// foreground and the bottom pixel as background.
pub struct HalfBlockRenderer {
    last_fg: Option<u8>,
    last_bg: Option<u8>,
}

impl HalfBlockRenderer {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }
}

impl Default for HalfBlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HalfBlockRenderer {
    fn name(&self) -> &'static str {
        "halfblock"
    }

    fn cell_pixels(&self) -> (usize, usize) {
        (1, 2)
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let Some((cols, visual_rows, w)) = frame_begin(frame, self.cell_pixels(), out)? else {
            return Ok(());
        };

        self.last_fg = None;
        self.last_bg = None;

        const HALF_BLOCK: char = '\u{2580}';

        for row in 0..visual_rows {
            let top_y = row * 2;
            let bot_y = top_y + 1;
            for x in 0..cols {
                // Grey frames: the red channel carries the brightness.
                let top = frame.pixels_rgba[(top_y * w + x) * 4];
                let bot = frame.pixels_rgba[(bot_y * w + x) * 4];

                if self.last_fg != Some(top) {
                    write!(out, "\x1b[38;2;{top};{top};{top}m")?;
                    self.last_fg = Some(top);
                }
                if self.last_bg != Some(bot) {
                    write!(out, "\x1b[48;2;{bot};{bot};{bot}m")?;
                    self.last_bg = Some(bot);
                }
                write!(out, "{HALF_BLOCK}")?;
            }
            // Next line (CRLF) with autowrap disabled.
            out.write_all(b"\r\n")?;
        }

        frame_end(frame, cols, visual_rows, out)
    }
}
