//! CSV report driver: renders each input font and prints its metrics.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use rayon::prelude::*;

use face_metrics::{write_header, write_row, Engine, Face, Metric, MetricVector};

mod font;

use font::FtFace;

#[derive(clap::Parser, Debug)]
#[command(about = "Compute shape metrics for typefaces and report them as CSV")]
struct Args {
    /// Character size in points (rendered at 300 dpi)
    #[arg(long, default_value_t = 12)]
    size: u32,
    /// Compute a single metric by name (e.g. AspectRatio) instead of
    /// the full vector
    #[arg(long)]
    metric: Option<String>,
    /// Write the CSV to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Paths to font files to analyze (may use glob syntax)
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    use clap::Parser as _;
    let args = Args::parse_from(wild::args());

    // An unknown metric name is a usage error; reject it before
    // touching any font file.
    let selected = match args.metric.as_deref() {
        None => None,
        Some(name) => match Metric::from_name(name) {
            Some(metric) => Some(metric),
            None => {
                eprintln!("not a valid metric: {name}");
                return ExitCode::from(2);
            }
        },
    };

    let engine = Engine::new();
    let faces: Vec<Option<(FtFace, MetricVector)>> = args
        .files
        .par_iter()
        .map(|path| match FtFace::new(path, args.size) {
            Ok(face) => {
                log::debug!("analyzing {}", path.display());
                let vector = engine.compute_all(&face);
                Some((face, vector))
            }
            Err(err) => {
                // One bad file never aborts the batch.
                eprintln!("skipping {}: {err}", path.display());
                None
            }
        })
        .collect();

    let mut out: BufWriter<Box<dyn Write>> = BufWriter::new(match &args.output {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(file),
            Err(err) => {
                eprintln!("cannot create {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdout()),
    });

    let result = write_report(&mut out, selected, &faces);
    if let Err(err) = result.and_then(|_| out.flush()) {
        eprintln!("write failed: {err}");
        return ExitCode::FAILURE;
    }
    if faces.iter().any(Option::is_none) {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn write_report<W: Write>(
    out: &mut W,
    selected: Option<Metric>,
    faces: &[Option<(FtFace, MetricVector)>],
) -> io::Result<()> {
    match selected {
        None => {
            write_header(out)?;
            for (face, vector) in faces.iter().flatten() {
                write_row(out, face, vector)?;
            }
        }
        Some(metric) => {
            writeln!(out, "Family Name,Style Name,{},", metric.display_name())?;
            for (face, vector) in faces.iter().flatten() {
                writeln!(
                    out,
                    "{},{},{:.6},",
                    face.family_name(),
                    face.style_name(),
                    vector[metric]
                )?;
            }
        }
    }
    Ok(())
}
