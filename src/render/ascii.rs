use crate::render::{frame_begin, frame_end, luma_u8, Frame, Renderer};
use std::io::Write;

pub struct AsciiRenderer {
    last_fg: Option<u8>,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self { last_fg: None }
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for AsciiRenderer {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn cell_pixels(&self) -> (usize, usize) {
        (1, 1)
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let Some((cols, visual_rows, w)) = frame_begin(frame, self.cell_pixels(), out)? else {
            return Ok(());
        };

        self.last_fg = None;

        // Dark -> bright ramp. Keep it ASCII-safe and compact.
        const RAMP: &[u8] = b" .,:;irsXA253hMHGS#9B&@";

        for y in 0..visual_rows {
            for x in 0..cols {
                let idx = (y * w + x) * 4;
                let l = luma_u8(
                    frame.pixels_rgba[idx],
                    frame.pixels_rgba[idx + 1],
                    frame.pixels_rgba[idx + 2],
                );
                let ch = RAMP[l as usize * (RAMP.len() - 1) / 255];

                if self.last_fg != Some(l) {
                    write!(out, "\x1b[38;2;{l};{l};{l}m")?;
                    self.last_fg = Some(l);
                }
                out.write_all(&[ch])?;
            }
            out.write_all(b"\r\n")?;
        }

        frame_end(frame, cols, visual_rows, out)
    }
}
