//! The raw PVN container.
//!
//! A text header, `PVN1 <streams>` followed by one line per stream of the form
//! `<format> <width> <height> <base_frame_time>`, is followed by frame records:
//! `u32` little-endian stream index, `f64` little-endian timestamp in seconds,
//! then the raw frame bytes of that stream.

use {
    crate::*,
    std::io::{BufRead, Read, Write},
};

pub const PVN_MAGIC: &str = "PVN1";

#[derive(Debug, Clone, PartialEq)]
pub struct PvnStreamHeader {
    pub format: &'static PixelFormat,
    pub width: usize,
    pub height: usize,
    pub base_frame_time: f64,
}

impl PvnStreamHeader {
    pub fn frame_size(&self) -> usize {
        self.format.frame_size(self.width, self.height)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PvnHeader {
    pub streams: Vec<PvnStreamHeader>,
}

fn corrupt(reason: impl Into<String>) -> VideoError {
    VideoError::Stream(format!("corrupt pvn header: {}", reason.into()))
}

fn read_line(reader: &mut impl BufRead) -> Result<String, VideoError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(corrupt("unexpected end of file"));
    }
    Ok(line.trim_end().to_string())
}

impl PvnHeader {
    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), VideoError> {
        writeln!(writer, "{} {}", PVN_MAGIC, self.streams.len())?;
        for stream in &self.streams {
            writeln!(
                writer,
                "{} {} {} {}",
                stream.format, stream.width, stream.height, stream.base_frame_time
            )?;
        }
        Ok(())
    }

    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, VideoError> {
        let first = read_line(reader)?;
        let count = match first.split_once(' ') {
            Some((PVN_MAGIC, count)) => count
                .parse::<usize>()
                .map_err(|_| corrupt(format!("bad stream count {count:?}")))?,
            _ => return Err(corrupt("missing PVN1 magic")),
        };

        // the count is untrusted, streams grow as their lines are read
        let mut streams = Vec::new();
        for _ in 0..count {
            let line = read_line(reader)?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            let &[format, width, height, base_frame_time] = fields.as_slice() else {
                return Err(corrupt(format!("bad stream line {line:?}")));
            };
            let number = |field: &str| {
                field
                    .parse::<usize>()
                    .map_err(|_| corrupt(format!("bad number {field:?}")))
            };
            let stream = PvnStreamHeader {
                format: video_format_from_string(format)?,
                width: number(width)?,
                height: number(height)?,
                base_frame_time: base_frame_time
                    .parse()
                    .map_err(|_| corrupt(format!("bad frame time {base_frame_time:?}")))?,
            };
            if stream
                .format
                .checked_frame_size(stream.width, stream.height)
                .is_none()
            {
                return Err(corrupt(format!("frame size overflows in {line:?}")));
            }
            streams.push(stream);
        }
        Ok(Self { streams })
    }
}

pub fn write_record(
    writer: &mut impl Write,
    stream: usize,
    time: f64,
    frame: &[u8],
) -> Result<(), VideoError> {
    let index = u32::try_from(stream)
        .map_err(|_| VideoError::Stream(format!("stream index {stream} too large")))?;
    writer.write_all(&index.to_le_bytes())?;
    writer.write_all(&time.to_le_bytes())?;
    writer.write_all(frame)?;
    Ok(())
}

/// Read the next record prefix. `None` at a clean end of file.
pub fn read_record_prefix(reader: &mut impl Read) -> Result<Option<(usize, f64)>, VideoError> {
    let mut index = [0u8; 4];
    match reader.read_exact(&mut index) {
        Ok(()) => {}
        Err(error) if error.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(error) => return Err(error.into()),
    }
    let mut time = [0u8; 8];
    reader.read_exact(&mut time)?;
    Ok(Some((
        u32::from_le_bytes(index) as usize,
        f64::from_le_bytes(time),
    )))
}
