use std::io::{BufRead, Write};

use crate::error::{Error, Result};

use super::format::{ParsedTrack, TracklistFormat};

fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut answer = String::new();
    let n = input
        .read_line(&mut answer)
        .map_err(|e| Error::io("<stdin>", e))?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(answer.trim().to_string()))
}

/// Show the first tracklist line and the supported formats, then ask the
/// user to pick one. Invalid answers are asked again; end of input aborts.
pub fn prompt_format<R: BufRead, W: Write>(
    first_line: &str,
    input: &mut R,
    output: &mut W,
) -> Result<TracklistFormat> {
    let io_err = |e| Error::io("<stdout>", e);

    writeln!(output, "\nFirst line of provided tracklist:").map_err(io_err)?;
    writeln!(output, "{first_line}").map_err(io_err)?;
    writeln!(output, "Supported tracklist formats:").map_err(io_err)?;
    for format in TracklistFormat::ALL {
        writeln!(output, "{}:   {}", format.number(), format.example()).map_err(io_err)?;
    }

    loop {
        write!(output, "Select format (1-{}): ", TracklistFormat::ALL.len()).map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let Some(answer) = read_answer(input)? else {
            return Err(Error::Declined);
        };
        if let Some(format) = answer
            .parse::<usize>()
            .ok()
            .and_then(TracklistFormat::from_number)
        {
            return Ok(format);
        }
        writeln!(output, "'{answer}' is not one of the listed formats.").map_err(io_err)?;
    }
}

/// Print the parsed items and ask for confirmation. An explicit `n` or end
/// of input declines; an empty answer accepts.
pub fn confirm<R: BufRead, W: Write>(
    tracks: &[ParsedTrack],
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let io_err = |e| Error::io("<stdout>", e);

    writeln!(output, "Tracklist has been parsed to following items:").map_err(io_err)?;
    for track in tracks {
        writeln!(output, "{track}").map_err(io_err)?;
    }
    write!(output, "Please confirm [Y/n]: ").map_err(io_err)?;
    output.flush().map_err(io_err)?;

    match read_answer(input)? {
        Some(answer) if answer.eq_ignore_ascii_case("n") => Err(Error::Declined),
        Some(_) => Ok(()),
        None => Err(Error::Declined),
    }
}
