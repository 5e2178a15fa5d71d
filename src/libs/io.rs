use anyhow::Context;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Opens `input` for buffered reading. `stdin` reads standard input and
/// files ending in `.gz` are decompressed on the fly.
///
/// ```
/// use std::io::BufRead;
/// let reader = afmsa::reader("tests/a3m/dimer.a3m").unwrap();
/// let lines = reader.lines().collect::<Result<Vec<_>, _>>().unwrap();
/// assert_eq!(lines[0], "#5,4\t1,1");
/// ```
pub fn reader(input: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = Path::new(input);
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

/// Opens `output` for buffered writing; `stdout` writes to the screen.
pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("could not create {}", output))?;
        Box::new(BufWriter::new(file))
    };

    Ok(writer)
}

/// Reads every line of `input`, keeping empty lines and stripping line endings.
pub fn read_lines(input: &str) -> anyhow::Result<Vec<String>> {
    let mut lines = vec![];
    for line in reader(input)?.lines() {
        lines.push(line.with_context(|| format!("could not read {}", input))?);
    }
    Ok(lines)
}

/// File name without directory and without its last extension.
///
/// ```
/// assert_eq!(afmsa::basename("data/job_1.a3m"), "job_1");
/// assert_eq!(afmsa::basename("job"), "job");
/// ```
pub fn basename(input: &str) -> String {
    Path::new(input)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// `<base>` or `<base>_<suffix>` when a suffix is given.
pub fn with_suffix(base: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        base.to_string()
    } else {
        format!("{}_{}", base, suffix)
    }
}

/// Creates `dir` (and parents) and returns `dir/<file_name>`.
pub fn out_path(dir: &str, file_name: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("could not create {}", dir))?;
    Ok(Path::new(dir).join(file_name))
}
