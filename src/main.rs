use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::{error, info, LevelFilter};

use hsbwheel::scene::{default_samples, random_samples};
use hsbwheel::img::MAX_TEXTURE_SIZE;
use hsbwheel::{img, Cylinder, HSVColor, LayoutConfig, Result, SceneLayout};

// CLI arg definition
#[derive(Parser, Debug)]
#[command(version, about = "HSB color cylinder toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the hue/saturation disk texture as an RGBA PNG
    Texture {
        #[arg(short, long, default_value("hs_disk.png"))]
        output: PathBuf,

        #[arg(short, long, default_value_t = 1024,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_TEXTURE_SIZE)))]
        size: u32,
    },

    /// Convert an HSV color to RGB
    Convert {
        #[command(flatten)]
        color: ColorArgs,
    },

    /// Position of an HSV color inside the cylinder
    Place {
        #[command(flatten)]
        color: ColorArgs,

        #[arg(long, default_value_t = 80.0, allow_negative_numbers = true)]
        radius: f64,

        #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
        height: f64,
    },

    /// Emit the scene layout as JSON
    Layout {
        /// Destination file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = 80.0)]
        radius: f64,

        #[arg(long, default_value_t = 100.0)]
        height: f64,

        #[arg(long, default_value_t = 6)]
        rings: u32,

        #[arg(long, default_value_t = 12)]
        spokes: u32,

        #[arg(long, default_value_t = 1024)]
        texture_size: u32,

        /// Number of additional random sample markers
        #[arg(long, value_name = "N", default_value_t = 0)]
        random: usize,

        #[arg(short, long, value_name = "KEY", default_value_t = 0)]
        seed: u64,

        /// Leave out the reference samples
        #[arg(long)]
        no_defaults: bool,
    },
}

#[derive(Args, Debug)]
struct ColorArgs {
    /// Hue in degrees, wraps modulo 360
    #[arg(allow_negative_numbers = true)]
    hue: f64,

    /// Saturation in [0, 1]
    #[arg(allow_negative_numbers = true)]
    sat: f64,

    /// Value (brightness) in [0, 1]
    #[arg(allow_negative_numbers = true)]
    val: f64,
}

impl ColorArgs {
    fn to_hsv(&self) -> Result<HSVColor> {
        HSVColor::checked(self.hue, self.sat, self.val)
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Texture { output, size } => {
            let buf = img::gradient_disk(size)?;
            img::write_image_rgba8(&buf, size, size, &output)
        }

        Command::Convert { color } => {
            let rgb = color.to_hsv()?.to_rgb();
            let [r, g, b] = rgb.to_rgb8();
            println!("{:.6} {:.6} {:.6}", rgb.red, rgb.green, rgb.blue);
            println!("{r} {g} {b}");
            println!("{}", rgb.to_hex());
            Ok(())
        }

        Command::Place { color, radius, height } => {
            let hsv = color.to_hsv()?;
            let p = Cylinder::checked(radius, height)?.place(&hsv);
            println!("{:.6} {:.6} {:.6}", p.x, p.y, p.z);
            Ok(())
        }

        Command::Layout {
            output,
            radius,
            height,
            rings,
            spokes,
            texture_size,
            random,
            seed,
            no_defaults,
        } => {
            let config = LayoutConfig { radius, height, rings, spokes, texture_size };

            let mut samples = if no_defaults { Vec::new() } else { default_samples() };
            samples.extend(random_samples(random, seed));

            let layout = SceneLayout::build(&config, &samples)?;
            match output {
                Some(path) => {
                    let mut w = BufWriter::new(File::create(&path)?);
                    layout.write_json(&mut w)?;
                    w.flush()?;
                    info!("Wrote layout with {} samples to {}", samples.len(), path.display());
                }
                None => {
                    let mut w = io::stdout().lock();
                    layout.write_json(&mut w)?;
                    writeln!(w)?;
                }
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
