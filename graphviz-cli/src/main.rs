use std::fs::read_to_string;
use std::io::Write;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use graphviz_rs::{
    get_installed_version, DotCommand, Engine, Format, GraphvizResult, ProcessRunner, Source, SystemRunner,
};
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn init_tracing(level: Level) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(err) = installed {
        eprintln!("can not install the log subscriber: {}", err);
    }
}

fn app() -> App<'static, 'static> {
    App::new("Graphviz utility")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Marcel Ibes <mibes@avaya.com>")
        .about("Queries the installed Graphviz and renders DOT sources with it")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("dot")
                .long("dot")
                .value_name("PATH")
                .env("GRAPHVIZ_DOT")
                .help("Sets the dot binary to run")
                .default_value(graphviz_rs::DOT_BINARY)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Logs the commands being run"),
        )
        .subcommand(SubCommand::with_name("version").about("Prints the version of the installed Graphviz"))
        .subcommand(
            SubCommand::with_name("pipe")
                .about("Renders a DOT file and writes the result to stdout")
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("Sets the input DOT file")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("format")
                        .short("T")
                        .long("format")
                        .value_name("FORMAT")
                        .help("Sets the output format")
                        .default_value("svg")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("engine")
                        .short("K")
                        .long("engine")
                        .value_name("ENGINE")
                        .help("Sets the layout engine")
                        .default_value("dot")
                        .takes_value(true),
                ),
        )
}

fn main() {
    let matches = app().get_matches();

    init_tracing(if matches.is_present("verbose") {
        Level::DEBUG
    } else {
        Level::WARN
    });

    let stdout = std::io::stdout();
    if let Err(err) = run(&matches, &SystemRunner, &mut stdout.lock()) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run<R, W>(matches: &ArgMatches, runner: &R, out: &mut W) -> GraphvizResult<()>
where
    R: ProcessRunner + ?Sized,
    W: Write,
{
    let dot = DotCommand::new(matches.value_of("dot").unwrap_or(graphviz_rs::DOT_BINARY));

    match matches.subcommand() {
        ("version", Some(_)) => {
            let version = get_installed_version(runner, &dot)?;
            writeln!(out, "{}", version)?;
        }
        ("pipe", Some(pipe)) => {
            let input_file = pipe.value_of("input").unwrap_or_default();
            let source = Source::new(read_to_string(input_file)?)
                .with_format(Format::new(pipe.value_of("format").unwrap_or("svg"))?)
                .with_engine(Engine::try_from(pipe.value_of("engine").unwrap_or("dot"))?);

            let rendered = source.pipe(runner, &dot)?;
            out.write_all(&rendered)?;
        }
        _ => {}
    }

    Ok(())
}
