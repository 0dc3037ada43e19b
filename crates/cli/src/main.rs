#![deny(unsafe_code)]
//! CLI binary for the chaos-game fractal generator.
//!
//! Subcommands:
//! - `render`: play the chaos game and write a PPM image
//! - `replay <seed.json>`: re-render a saved run description
//! - `seed`: print the default run description as JSON

mod error;

use chaos_game_core::geometry::{Point, Triangle};
use chaos_game_core::prng::Xorshift64;
use chaos_game_core::seed::{
    iterations_from_count, DEFAULT_HEIGHT, DEFAULT_ITERATIONS, DEFAULT_OUTPUT, DEFAULT_PRNG_SEED,
    DEFAULT_WIDTH,
};
use chaos_game_core::Seed;
use chaos_game_export::{export, ExportOutcome, ExportPolicy};
use clap::{Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

/// Mixed into the PRNG seed when drawing random vertices, so the vertex
/// draw and the jump sequence do not share a stream.
const VERTEX_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Parser)]
#[command(name = "chaos-game", about = "Chaos-game fractal generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play the chaos game and write a plain-text PPM image.
    Render {
        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
        height: usize,

        /// Number of point jumps; zero or negative leaves the background untouched.
        #[arg(
            short = 'n',
            long,
            default_value_t = DEFAULT_ITERATIONS as i64,
            allow_negative_numbers = true
        )]
        iterations: i64,

        /// PRNG seed for deterministic output (default: derived from the clock).
        #[arg(long)]
        seed: Option<u64>,

        /// Output file path.
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Triangle vertex as X,Y. Give exactly three, or none for the canvas triangle.
        #[arg(long = "vertex", value_name = "X,Y", value_parser = parse_point)]
        vertices: Vec<Point>,

        /// Draw the triangle's vertices at random inside the canvas.
        #[arg(long, conflicts_with = "vertices")]
        random_vertices: bool,

        /// Exit non-zero if the image cannot be written.
        #[arg(long)]
        strict: bool,

        /// Also write the run description to this JSON file.
        #[arg(long, value_name = "PATH")]
        save_seed: Option<PathBuf>,
    },
    /// Re-render a run description saved with `--save-seed`.
    Replay {
        /// Seed JSON file.
        file: PathBuf,

        /// Override the output path stored in the seed.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit non-zero if the image cannot be written.
        #[arg(long)]
        strict: bool,
    },
    /// Print the default run description as JSON.
    Seed,
}

/// Parses `"x,y"` into a point.
fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate {v:?}: {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(DEFAULT_PRNG_SEED)
}

/// Assembles and validates the run description for `render`.
fn build_seed(
    width: usize,
    height: usize,
    iterations: usize,
    seed: u64,
    output: PathBuf,
    vertices: &[Point],
    random_vertices: bool,
) -> Result<Seed, CliError> {
    let mut run = Seed::new(width, height, seed);
    run.iterations = iterations;
    run.output = output;
    if random_vertices {
        let mut rng = Xorshift64::new(seed ^ VERTEX_SALT);
        run.vertices = Triangle::random_within(width, height, &mut rng)?;
    } else if !vertices.is_empty() {
        run.vertices = Triangle::from_slice(vertices)?;
    }
    run.validate()?;
    Ok(run)
}

/// Renders `run`, writes the image and reports the result.
///
/// Under `ExportPolicy::Report` a failed write is printed and the command
/// still succeeds.
fn render_and_export(run: &Seed, policy: ExportPolicy, json: bool) -> Result<(), CliError> {
    let (raster, plotted) = chaos_game_sierpinski::render(run)?;
    let outcome = export(&raster, &run.output, policy)?;

    let failure = match &outcome {
        ExportOutcome::Written => None,
        ExportOutcome::Failed(e) => Some(e.to_string()),
    };

    if json {
        let info = serde_json::json!({
            "width": run.width,
            "height": run.height,
            "iterations": run.iterations,
            "plotted": plotted,
            "seed": run.seed,
            "output": run.output.display().to_string(),
            "written": failure.is_none(),
            "error": failure,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else if let Some(msg) = failure {
        eprintln!("error: could not write image: {msg}");
    } else {
        eprintln!(
            "rendered chaos game ({}x{}, {} iterations, seed {}) -> {}",
            run.width,
            run.height,
            run.iterations,
            run.seed,
            run.output.display()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Seed => {
            println!("{}", serde_json::to_string_pretty(&Seed::default())?);
        }
        Command::Render {
            width,
            height,
            iterations,
            seed,
            output,
            vertices,
            random_vertices,
            strict,
            save_seed,
        } => {
            let run = build_seed(
                width,
                height,
                iterations_from_count(iterations),
                seed.unwrap_or_else(clock_seed),
                output,
                &vertices,
                random_vertices,
            )?;
            if let Some(path) = save_seed {
                run.save(&path)?;
            }
            render_and_export(&run, ExportPolicy::from_strict(strict), cli.json)?;
        }
        Command::Replay {
            file,
            output,
            strict,
        } => {
            let mut run = Seed::load(&file)?;
            if let Some(path) = output {
                run.output = path;
            }
            render_and_export(&run, ExportPolicy::from_strict(strict), cli.json)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({
                "error": e.to_string(),
                "kind": e.kind(),
                "exit_code": e.exit_code(),
            });
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("chaos-game").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_point_accepts_pairs() {
        assert_eq!(parse_point("250,0").unwrap(), Point::new(250.0, 0.0));
        assert_eq!(parse_point(" 1.5 , -2 ").unwrap(), Point::new(1.5, -2.0));
    }

    #[test]
    fn parse_point_rejects_garbage() {
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn render_defaults_match_classic_run() {
        let Command::Render {
            width,
            height,
            iterations,
            seed,
            output,
            vertices,
            random_vertices,
            strict,
            save_seed,
        } = parse(&["render"]).command
        else {
            panic!("expected render");
        };
        assert_eq!((width, height, iterations), (500, 500, 100_000));
        assert_eq!(seed, None);
        assert_eq!(output, PathBuf::from("foo.ppm"));
        assert!(vertices.is_empty());
        assert!(!random_vertices && !strict);
        assert!(save_seed.is_none());
    }

    #[test]
    fn vertex_flag_collects_points() {
        let cli = parse(&[
            "render", "--vertex", "0,0", "--vertex", "10,0", "--vertex", "0,10",
        ]);
        let Command::Render { vertices, .. } = cli.command else {
            panic!("expected render");
        };
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1], Point::new(10.0, 0.0));
    }

    #[test]
    fn random_vertices_conflicts_with_vertex() {
        let result = Cli::try_parse_from([
            "chaos-game",
            "render",
            "--random-vertices",
            "--vertex",
            "0,0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn build_seed_rejects_two_vertices_as_input_error() {
        let err = build_seed(
            10,
            10,
            1,
            1,
            PathBuf::from("x.ppm"),
            &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            false,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn build_seed_rejects_collinear_vertices() {
        let flat = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(9.0, 9.0),
        ];
        let err = build_seed(10, 10, 1, 1, PathBuf::from("x.ppm"), &flat, false).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn build_seed_rejects_zero_width() {
        let err = build_seed(0, 10, 1, 1, PathBuf::from("x.ppm"), &[], false).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn build_seed_random_vertices_is_deterministic() {
        let a = build_seed(64, 64, 1, 5, PathBuf::from("a.ppm"), &[], true).unwrap();
        let b = build_seed(64, 64, 1, 5, PathBuf::from("b.ppm"), &[], true).unwrap();
        assert_eq!(a.vertices, b.vertices);
        assert!(a.vertices.validate().is_ok());
    }

    #[test]
    fn render_writes_ppm_and_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("tri.ppm");
        let seed_path = dir.path().join("tri.json");
        let cli = parse(&[
            "render",
            "-W",
            "40",
            "-H",
            "30",
            "-n",
            "2000",
            "--seed",
            "7",
            "-o",
            out.to_str().unwrap(),
            "--save-seed",
            seed_path.to_str().unwrap(),
        ]);
        run(cli).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(&lines[..4], ["P3", "# tri.ppm", "40 30", "255"]);
        assert_eq!(lines.len(), 4 + 40 * 30);

        let saved = Seed::load(&seed_path).unwrap();
        assert_eq!((saved.width, saved.height, saved.seed), (40, 30, 7));
    }

    #[test]
    fn replay_reproduces_render_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.ppm");
        let second = dir.path().join("second.ppm");
        let seed_path = dir.path().join("run.json");
        run(parse(&[
            "render",
            "-W",
            "50",
            "-H",
            "50",
            "-n",
            "5000",
            "--seed",
            "3",
            "-o",
            first.to_str().unwrap(),
            "--save-seed",
            seed_path.to_str().unwrap(),
        ]))
        .unwrap();
        run(parse(&[
            "replay",
            seed_path.to_str().unwrap(),
            "-o",
            second.to_str().unwrap(),
        ]))
        .unwrap();

        let a = std::fs::read_to_string(&first).unwrap();
        let b = std::fs::read_to_string(&second).unwrap();
        let body = |s: &str| s.lines().skip(2).map(String::from).collect::<Vec<_>>();
        assert_eq!(body(&a), body(&b));
    }

    #[test]
    fn negative_iterations_render_background_only() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("blank.ppm");
        let cli = parse(&[
            "render",
            "-W",
            "4",
            "-H",
            "3",
            "-n",
            "-5",
            "--seed",
            "1",
            "-o",
            out.to_str().unwrap(),
        ]);
        run(cli).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4 + 12);
        assert!(lines[4..].iter().all(|&l| l == "0 0 0"));
    }

    #[test]
    fn oversized_canvas_is_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("huge.ppm");
        let cli = parse(&[
            "render",
            "-W",
            "1099511627776",
            "-H",
            "1048576",
            "-n",
            "1",
            "--seed",
            "1",
            "-o",
            out.to_str().unwrap(),
        ]);
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 10);
        assert!(!out.exists());
    }

    #[test]
    fn unwritable_output_is_reported_but_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("x.ppm");
        let cli = parse(&["render", "-n", "10", "--seed", "1", "-o", out.to_str().unwrap()]);
        assert!(run(cli).is_ok());
    }

    #[test]
    fn unwritable_output_is_fatal_with_strict() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("x.ppm");
        let cli = parse(&[
            "render",
            "-n",
            "10",
            "--seed",
            "1",
            "--strict",
            "-o",
            out.to_str().unwrap(),
        ]);
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn replay_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let err = run(parse(&["replay", missing.to_str().unwrap()])).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }
}
