use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, Subcommand};
use html5up_hugo::assemble::Assembler;
use html5up_hugo::batch::{self, Outcome};
use html5up_hugo::config::{self, ToolConfig};
use html5up_hugo::fetch::{Fetcher, HttpDownloader};
use html5up_hugo::preview::{Composer, HugoCommand};
use html5up_hugo::types::ThemeRecord;
use html5up_hugo::workspace::Workspace;
use html5up_hugo::{Error, output};
use std::path::PathBuf;
use std::process::ExitCode;

/// Flags for the `get` command.
#[derive(clap::Args, Clone, Default)]
struct GetArgs {
    /// Concurrent downloads (overrides fetch.jobs; 1 = sequential)
    #[arg(long)]
    jobs: Option<usize>,
}

/// Flags for the `build` command.
#[derive(clap::Args, Clone, Default)]
struct BuildArgs {
    /// Assemble themes only, skip the preview site
    #[arg(long)]
    no_preview: bool,

    /// Site generator executable (overrides preview.hugo)
    #[arg(long)]
    hugo: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "html5up-hugo")]
#[command(about = "Convert html5up.net themes into Hugo themes")]
#[command(long_about = "\
Convert html5up.net themes into Hugo themes

Workspace structure:

  ./
  ├── config.toml                  # [[themes]] name + description
  ├── template/
  │   ├── theme.toml               # Metadata template (Tera: name, description, title, | toml filter)
  │   ├── layouts/                 # Shared layouts
  │   ├── themes/<name>/layouts/   # Per-theme layouts (override shared)
  │   └── preview/                 # Preview site config.toml + images/post-N.jpg
  ├── exampleSite/                 # Hugo site rendered with every theme
  ├── temp/download/<name>/        # ← get
  ├── build/<name>/                # ← build
  └── preview/                     # ← build

Run 'html5up-hugo get' once, then 'html5up-hugo build' (the default).")]
#[command(version)]
struct Cli {
    /// Workspace root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Delete previous output (staging for get, build and preview for build) first
    #[arg(long, global = true)]
    clean: bool,

    /// Continue with the remaining themes when one fails, report all failures at the end
    #[arg(long, global = true)]
    keep_going: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Download and extract every configured theme
    Get(GetArgs),
    /// Assemble Hugo themes and render the preview site
    Build(BuildArgs),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => {
            let command = match err.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(name)) => name.clone(),
                _ => std::env::args().nth(1).unwrap_or_default(),
            };
            println!("{command:?} is not a valid command.");
            return ExitCode::from(2);
        }
        Err(err) => err.exit(),
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let workspace = Workspace::new(&cli.root);
    let config = config::load_config(&workspace.config_file())?;
    if config.themes.is_empty() {
        log::warn!("no themes configured in {}", workspace.config_file().display());
    }

    let opts = RunOptions {
        clean: cli.clean,
        keep_going: cli.keep_going,
    };
    match cli
        .command
        .unwrap_or_else(|| Command::Build(BuildArgs::default()))
    {
        Command::Get(args) => get(&opts, &workspace, &config, args),
        Command::Build(args) => build(&opts, &workspace, &config, args),
    }
}

/// Flags shared by every command.
struct RunOptions {
    clean: bool,
    keep_going: bool,
}

fn get(
    opts: &RunOptions,
    ws: &Workspace,
    config: &ToolConfig,
    args: GetArgs,
) -> Result<(), Error> {
    let downloader = HttpDownloader::new(config.fetch.timeout())?;
    let fetcher = Fetcher::new(ws.clone(), downloader, config.fetch.url_template.as_str())
        .with_jobs(args.jobs.unwrap_or(config.fetch.jobs));
    if opts.clean {
        fetcher.clean()?;
    }

    let outcome = if opts.keep_going {
        Outcome::from_results(&config.themes, fetcher.fetch_all(&config.themes)?)
    } else {
        Outcome::succeeded(fetcher.fetch(&config.themes)?)
    };

    output::print_fetch_output(&outcome.done, ws.root());
    output::print_failures(&outcome.failures);
    outcome.finish().map(|_| ())
}

fn build(
    opts: &RunOptions,
    ws: &Workspace,
    config: &ToolConfig,
    args: BuildArgs,
) -> Result<(), Error> {
    let assembler = Assembler::new(ws.clone());
    if opts.clean {
        assembler.clean()?;
    }
    let assembled = batch::run_each(batch::numbered(&config.themes), opts.keep_going, |_, theme| {
        Ok(assembler.assemble_theme(theme)?)
    })?;
    output::print_build_output(&assembled.done, ws.root());

    if args.no_preview {
        output::print_failures(&assembled.failures);
        return assembled.finish().map(|_| ());
    }

    // Only themes that assembled can be previewed; weights keep config order.
    let ready: Vec<(usize, &ThemeRecord)> = batch::numbered(&config.themes)
        .filter(|(_, theme)| assembled.done.iter().any(|a| a.name == theme.name))
        .collect();

    let program = args.hugo.unwrap_or_else(|| config.preview.hugo.clone());
    let composer = Composer::new(ws.clone(), HugoCommand::new(program), config.preview.port);
    composer.prepare(opts.clean)?;
    let mut previewed = batch::run_each(ready, opts.keep_going, |weight, theme| {
        Ok(composer.preview_theme(weight, theme)?)
    })?;
    output::print_preview_output(&previewed.done);

    previewed.absorb_failures(assembled.failures);
    output::print_failures(&previewed.failures);
    previewed.finish().map(|_| ())
}
