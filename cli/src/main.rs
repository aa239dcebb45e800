mod config;
mod loader;
mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use pagebuilder::block::Block;
use pagebuilder::parser::ValidationError;
use renderer::{AssemblyMode, DataMap, DataValue, Page};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;
use crate::loader::TemplateLoader;

const SUBCOMMANDS: &[&str] = &["render", "test", "help"];

#[derive(Parser)]
#[command(name = "pagebuilder", version, about = "Marker-comment HTML page builder")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    /// Settings file (defaults to ./pagebuilder.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a page template to stdout
    Render(RenderArgs),

    /// Run .test.html fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Logical page name, resolved under the template directory
    page: String,

    /// Treat PAGE as a path to a template file
    #[arg(long)]
    file: bool,

    /// TOML file of label = value pairs
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Substitute a single block (repeatable; wins over --data)
    #[arg(short, long = "set", value_name = "LABEL=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, DataValue)>,

    /// Use placeholder-string reassembly (first child fills every slot)
    #[arg(long)]
    legacy_assembly: bool,

    /// Override the prefix for relative asset references
    #[arg(long)]
    asset_base: Option<String>,

    /// Validate only, don't render (exit 0 if valid)
    #[arg(long)]
    check: bool,

    /// Dump the block tree
    #[arg(long)]
    tree: bool,

    /// List all block labels in the template
    #[arg(long)]
    list_blocks: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.html file or directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short = 'C', long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagebuilder=warn,renderer=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // `pagebuilder index` is shorthand for `pagebuilder render index`.
    let mut args: Vec<String> = std::env::args().collect();
    if let Some(pos) = first_positional(&args) {
        if !SUBCOMMANDS.contains(&args[pos].as_str()) {
            args.insert(pos, "render".to_string());
        }
    }

    let cli = Cli::parse_from(&args);

    match cli.command {
        Command::Render(render_args) => do_render(render_args, cli.config.as_deref(), cli.no_color),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

/// Index of the first argument that is neither a flag nor the value of `--config`.
fn first_positional(args: &[String]) -> Option<usize> {
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => i += 2,
            a if a.starts_with('-') => i += 1,
            _ => return Some(i),
        }
    }
    None
}

fn parse_assignment(s: &str) -> Result<(String, DataValue), String> {
    let (label, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=VALUE, got `{}`", s))?;
    let label = label.trim();
    if label.is_empty() {
        return Err("label must not be empty".to_string());
    }
    Ok((label.to_string(), DataValue::infer(value)))
}

fn do_render(args: RenderArgs, config_path: Option<&Path>, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let settings = match Settings::load(config_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    // Read source
    let (name, source) = if args.file {
        match std::fs::read_to_string(&args.page) {
            Ok(s) => (args.page.clone(), s),
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", args.page, e);
                process::exit(1);
            }
        }
    } else {
        match TemplateLoader::from_settings(&settings).load(&args.page) {
            Ok((path, s)) => (path.display().to_string(), s),
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(name.clone(), source.clone());
    let writer = StandardStream::stderr(color_choice);
    let term_config = term::Config::default();

    // Parse
    let template = match pagebuilder::parser::Parser::new(source, file_id).parse() {
        Ok(t) => t,
        Err(errors) => {
            emit_diagnostics(&writer, &term_config, &files, &errors);
            println!("{}", settings.error_message);
            process::exit(1);
        }
    };
    emit_diagnostics(&writer, &term_config, &files, &template.warnings);

    if args.check {
        eprintln!("ok: {} is well-formed", name);
        return;
    }

    if args.tree {
        println!("{:#?}", template.blocks);
        return;
    }

    if args.list_blocks {
        fn print_blocks<'a>(blocks: impl IntoIterator<Item = &'a Block>, indent: usize) {
            for block in blocks {
                let pad = "  ".repeat(indent);
                let slots = block.slots().count();
                if slots == 0 {
                    println!("{}{}", pad, block.label);
                } else {
                    println!("{}{} ({} slot(s))", pad, block.label, slots);
                }
                print_blocks(&block.children, indent + 1);
            }
        }
        print_blocks(&template.blocks, 0);
        return;
    }

    let mut data = match &args.data {
        Some(path) => match config::load_data(path) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        },
        None => DataMap::new(),
    };
    data.extend(args.set.into_iter().collect());

    let mut options = settings.page_options();
    if args.legacy_assembly {
        options.assembly = AssemblyMode::Legacy;
    }
    if let Some(base) = args.asset_base {
        options.asset_base = Some(base);
    }

    let page = Page::from_template(template, &data, &options);
    print!("{}", page.view());
}

fn emit_diagnostics(
    writer: &StandardStream,
    config: &term::Config,
    files: &SimpleFiles<String, String>,
    diagnostics: &[ValidationError],
) {
    for diag in diagnostics {
        let _ = term::emit_to_write_style(&mut writer.lock(), config, files, &diag.to_diagnostic());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_page_after_global_options() {
        assert_eq!(first_positional(&args(&["pb", "index"])), Some(1));
        assert_eq!(first_positional(&args(&["pb", "-c", "site.toml", "index"])), Some(3));
        assert_eq!(first_positional(&args(&["pb", "--no-color", "test", "x"])), Some(2));
        assert_eq!(first_positional(&args(&["pb", "--version"])), None);
    }

    #[test]
    fn parses_assignments() {
        assert_eq!(
            parse_assignment("title=Hello = World"),
            Ok(("title".to_string(), DataValue::Text("Hello = World".into())))
        );
        assert_eq!(
            parse_assignment("count=3"),
            Ok(("count".to_string(), DataValue::Integer(3)))
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }
}
