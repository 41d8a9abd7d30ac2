use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use radial::{Scene, Style};
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use strum::{Display, EnumString};
use weekclock::config::{self, Config, Weekday};
use weekclock::sys::server::SOCKET_PATH;

#[derive(Parser, Debug)]
#[command(name = "heptaweek", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Render the week clock to an SVG or PNG file ("-" writes SVG to stdout).
    Render {
        output: PathBuf,

        /// Output format, guessed from the file extension when omitted
        #[arg(short, long)]
        format: Option<Format>,

        /// Edge length of the image in pixels
        #[arg(short, long)]
        size: Option<f64>,

        /// Hour rings per day sector
        #[arg(short, long)]
        rings: Option<usize>,

        /// Day shown at the top of the clock
        #[arg(short, long)]
        week_start: Option<Weekday>,

        /// Leave the background transparent
        #[arg(short, long)]
        transparent: bool,
    },
    /// Show the week clock overlay.
    Show,
    /// Hide the week clock overlay.
    Hide,
    /// Show the overlay if hidden, hide it otherwise.
    Toggle,
    /// Ask the overlay to reload its configuration.
    Reload,
    /// Write the default config file if missing and print its path.
    InitConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Format {
    Svg,
    Png,
}

impl Format {
    fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
            .unwrap_or(Format::Svg)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            output,
            format,
            size,
            rings,
            week_start,
            transparent,
        } => {
            let mut config = config::load_or_default();
            if let Some(size) = size {
                config.layout.size = size;
            }
            if let Some(rings) = rings {
                config.layout.ring_count = rings;
            }
            if let Some(day) = week_start {
                config.labels.week_start = day;
                config.labels.names = None;
            }
            let style = if transparent {
                Style::default().transparent()
            } else {
                Style::default()
            };
            let format = format.unwrap_or_else(|| Format::for_path(&output));
            render(&config, &style, &output, format)
        }
        Commands::Show => send_command("show"),
        Commands::Hide => send_command("hide"),
        Commands::Toggle => send_command("toggle"),
        Commands::Reload => send_command("reload"),
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn render(config: &Config, style: &Style, output: &Path, format: Format) -> anyhow::Result<()> {
    let to_stdout = output == Path::new("-");
    if to_stdout && format == Format::Png {
        anyhow::bail!("PNG output needs a file name; only SVG can be written to stdout");
    }

    let scene = Scene::week_clock(&config.layout, &config.clock_labels(), style)?;
    log::info!("Rendering {} to {}", format, output.display());

    match format {
        Format::Svg if to_stdout => {
            std::io::stdout().write_all(radial::svg::to_svg(&scene).as_bytes())?;
        }
        Format::Svg => fs_err::write(output, radial::svg::to_svg(&scene))?,
        Format::Png => {
            let px = scene.size.ceil() as i32;
            let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, px, px)?;
            {
                let cr = cairo::Context::new(&surface)?;
                radial::paint::paint(&cr, &scene)?;
            }
            surface.flush();
            let mut file = fs_err::File::create(output)?;
            surface
                .write_to_png(&mut file)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
    }
    Ok(())
}

fn send_command(cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to the week clock at {}: {}. Is weekclock running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::for_path(Path::new("week.png")), Format::Png);
        assert_eq!(Format::for_path(Path::new("week.PNG")), Format::Png);
        assert_eq!(Format::for_path(Path::new("week.svg")), Format::Svg);
        assert_eq!(Format::for_path(Path::new("week")), Format::Svg);
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "heptaweek", "render", "out.png", "--rings", "24", "-w", "mon",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                output,
                rings,
                week_start,
                format,
                ..
            } => {
                assert_eq!(output, PathBuf::from("out.png"));
                assert_eq!(rings, Some(24));
                assert_eq!(week_start, Some(Weekday::Monday));
                assert_eq!(format, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_png_to_stdout_is_rejected() {
        let err = render(&Config::default(), &Style::default(), Path::new("-"), Format::Png)
            .unwrap_err();
        assert!(err.to_string().contains("stdout"), "{err}");
    }

    #[test]
    fn test_render_rejects_huge_ring_count() {
        let mut config = Config::default();
        config.layout.ring_count = 1_000_000_000_000;
        let path =
            std::env::temp_dir().join(format!("heptaweek-huge-{}.svg", std::process::id()));
        assert!(render(&config, &Style::default(), &path, Format::Svg).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_render_svg_file() {
        let path = std::env::temp_dir().join(format!("heptaweek-{}.svg", std::process::id()));
        render(&Config::default(), &Style::default(), &path, Format::Svg).unwrap();
        let svg = fs_err::read_to_string(&path).unwrap();
        let _ = fs_err::remove_file(&path);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">Saturday</text>"));
    }
}
