use {base::init_stdout_logger, video::*};

const USAGE: &str = "usage: record <input-uri> <output-uri> [frames]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stdout_logger();

    let mut args = std::env::args().skip(1);
    let (Some(input_uri), Some(output_uri)) = (args.next(), args.next()) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    let max_frames = match args.next() {
        Some(frames) => frames.parse::<usize>()?,
        None => 0,
    };

    let input = VideoInput::with_uri(&input_uri)?;
    let mut output = VideoOutput::with_uri(&output_uri)?;

    let (width, height) = (input.width()?, input.height()?);
    let format = input.pix_format()?;
    let stream = output.add_stream(width, height, format.name())?;
    log::info!("recording {}x{} {} to {}", width, height, format, output_uri);

    let mut image = vec![0u8; input.size_bytes()?];
    let mut frames = 0usize;
    input.start()?;
    while max_frames == 0 || frames < max_frames {
        if !input.grab_next(&mut image, true)? {
            break;
        }
        output
            .stream(stream)?
            .write_image(&image, width, height, format.name(), None)?;
        frames += 1;
    }
    input.stop()?;

    log::info!("recorded {} frames", frames);
    Ok(())
}
