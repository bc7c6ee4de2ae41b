use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Render,
    Init,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Render(RenderArgs),
    Init(InitArgs),
}

#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub config: PathBuf,
    pub verbose: bool,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct InitArgs {
    pub config: PathBuf,
}

const DEFAULT_CONFIG: &str = "oraqb.toml";

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "render" => parse_render(it.map(|s| s.as_str())),
        "init" => parse_init(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn parse_config<'a>(
    token: &str,
    it: &mut impl Iterator<Item = &'a str>,
) -> anyhow::Result<Option<PathBuf>> {
    if token == "--config" {
        let Some(v) = it.next() else {
            anyhow::bail!("--config requires a value");
        };
        return Ok(Some(PathBuf::from(v)));
    }
    if let Some(v) = token.strip_prefix("--config=") {
        return Ok(Some(PathBuf::from(v)));
    }
    Ok(None)
}

fn parse_render<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut verbose = false;
    let mut files: Vec<PathBuf> = Vec::new();

    while let Some(token) = it.next() {
        if let Some(path) = parse_config(token, &mut it)? {
            config = path;
            continue;
        }
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Render)),
            "-v" | "--verbose" => verbose = true,
            other if other.starts_with('-') => anyhow::bail!("unknown argument: {other}"),
            other => files.push(PathBuf::from(other)),
        }
    }

    if files.is_empty() {
        anyhow::bail!("render requires at least one descriptor file");
    }

    Ok(Command::Render(RenderArgs {
        config,
        verbose,
        files,
    }))
}

fn parse_init<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);

    while let Some(token) = it.next() {
        if let Some(path) = parse_config(token, &mut it)? {
            config = path;
            continue;
        }
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Init)),
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    Ok(Command::Init(InitArgs { config }))
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
oraqb - render query descriptors into Oracle SQL

USAGE:
  oraqb <COMMAND> [OPTIONS]

COMMANDS:
  render        Print the SQL for one or more JSON query descriptors
  init          Write a template oraqb.toml

Run `oraqb <command> --help` for more."
            );
        }
        HelpTopic::Render => {
            println!(
                "\
USAGE:
  oraqb render [OPTIONS] <DESCRIPTOR.json>...

OPTIONS:
  --config <FILE>       Config file path (default: oraqb.toml)
  -v, --verbose         Log at DEBUG instead of INFO

Column types listed under [column_types.<TABLE>] in the config drive
date normalization; no database connection is opened."
            );
        }
        HelpTopic::Init => {
            println!(
                "\
USAGE:
  oraqb init [OPTIONS]

OPTIONS:
  --config <FILE>       Path to write (default: oraqb.toml)"
            );
        }
    }
}
