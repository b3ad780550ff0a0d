use chartcell::{
    BaseConfiguration, Chart, ChartKind, DisplayOptions, OptionChart, StaticPage,
    discover_container_id, parse_rendering, write_evcxr_content,
};
use serde_json::Value;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Chart(chartcell::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Chart(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<chartcell::Error> for CliError {
    fn from(value: chartcell::Error) -> Self {
        Self::Chart(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Snippet,
    Fragment,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    style: Option<String>,
    chart_id: Option<String>,
    kind: Option<String>,
    option_input: bool,
    assets_host: Option<String>,
    config: Option<String>,
    evcxr: bool,
    pretty: bool,
    out: Option<String>,
}

fn usage() -> &'static str {
    "chartcell-cli\n\
\n\
USAGE:\n\
  chartcell-cli [snippet] [--style <css>] [--config <path>] [--id <chart-id>] [--kind <kind>] [--option] [--assets-host <url>] [--display] [--out <path>] [<path>|-]\n\
  chartcell-cli fragment [--pretty] [--id <chart-id>] [--kind <kind>] [--option] [--assets-host <url>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a standalone chart HTML page; with --option it is an ECharts option JSON object.\n\
  - --kind defaults to 'bar'; it must name a supported chart kind.\n\
  - --id defaults to the first <div id> of the page (or a generated id with --option).\n\
  - --config reads display options JSON: {\"style\": ..., \"loader\": {\"moduleName\": ..., \"globalName\": ...}}.\n\
  - --style overrides the style from --config.\n\
  - snippet --display wraps the output in evcxr EVCXR_BEGIN_CONTENT/EVCXR_END_CONTENT markers.\n\
  - fragment prints the extracted container id, script sources and inline scripts as JSON.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "snippet" => args.command = Command::Snippet,
            "fragment" => args.command = Command::Fragment,
            "--option" => args.option_input = true,
            "--display" => args.evcxr = true,
            "--pretty" => args.pretty = true,
            "--style" => {
                let Some(style) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.style = Some(style.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if id.trim().is_empty() {
                    return Err(CliError::Usage(usage()));
                }
                args.chart_id = Some(id.clone());
            }
            "--kind" => {
                let Some(kind) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.kind = Some(kind.clone());
            }
            "--assets-host" => {
                let Some(host) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.assets_host = Some(host.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_options(args: &Args) -> Result<DisplayOptions, CliError> {
    let mut options = match args.config.as_deref() {
        Some(path) => DisplayOptions::from_json(&std::fs::read_to_string(path)?)?,
        None => DisplayOptions::default(),
    };
    if let Some(style) = &args.style {
        options.style = style.clone();
    }
    Ok(options)
}

fn build_chart(args: &Args, text: String) -> Result<Box<dyn Chart>, CliError> {
    let kind = args.kind.as_deref().unwrap_or("bar").parse::<ChartKind>()?;

    if args.option_input {
        let option: Value = serde_json::from_str(&text)?;
        let mut chart = OptionChart::new(kind, option);
        if let Some(id) = &args.chart_id {
            chart = chart.with_chart_id(id.clone());
        }
        if let Some(host) = &args.assets_host {
            chart = chart.with_assets_host(host.clone());
        }
        return Ok(Box::new(chart));
    }

    let chart_id = match &args.chart_id {
        Some(id) => id.clone(),
        None => discover_container_id(&text)?,
    };
    Ok(Box::new(StaticPage::with_base(
        BaseConfiguration::for_kind(kind, chart_id),
        text,
    )))
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let chart = build_chart(&args, text)?;

    match args.command {
        Command::Fragment => {
            let fragment = parse_rendering(&chart)?;
            let json = if args.pretty {
                serde_json::to_string_pretty(&fragment)?
            } else {
                serde_json::to_string(&fragment)?
            };
            write_text(&format!("{json}\n"), args.out.as_deref())
        }
        Command::Snippet => {
            let options = load_options(&args)?;
            let html = chartcell::display_content(&chart, &options)?;
            if args.evcxr {
                let mut buf = Vec::new();
                write_evcxr_content(&mut buf, chartcell::display::HTML_MIME, &html)?;
                let framed = String::from_utf8_lossy(&buf).into_owned();
                write_text(&framed, args.out.as_deref())
            } else {
                write_text(&html, args.out.as_deref())
            }
        }
    }
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(args) {
        match err {
            CliError::Usage(msg) => {
                eprintln!("{msg}");
                std::process::exit(2);
            }
            other => {
                eprintln!("{other}");
                std::process::exit(1);
            }
        }
    }
}
