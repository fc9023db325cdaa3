//! `upguide` - CLI for updateguide
//!
//! Loads the board catalog once and answers lookups against it the same way
//! the update page does.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use updateguide::cli::{
    CatalogCommand, Cli, Command, ConfigCommand, OutputFormat, ResolveCommand, SearchCommand,
    VersionsCommand,
};
use updateguide::{
    build_version_chooser, init_logging, load_catalog_file, render, suggest,
    BoardInstructionResolver, CatalogLoad, Config, FirmwareInfo, Os,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // Config commands load (or validate) the file themselves
    if let Command::Config(cmd) = cli.command {
        return handle_config(cli.config, cli.catalog, cmd);
    }

    let config = load_config(cli.config, cli.catalog)?;
    match cli.command {
        Command::Resolve(cmd) => handle_resolve(&config, &cmd),
        Command::Search(cmd) => handle_search(&config, &cmd),
        Command::Versions(cmd) => handle_versions(&config, &cmd),
        Command::Catalog(cmd) => handle_catalog(&config, &cmd),
        // handled above
        Command::Config(_) => Ok(()),
    }
}

fn load_config(path: Option<PathBuf>, catalog: Option<PathBuf>) -> anyhow::Result<Config> {
    let mut config = Config::load_from(path)?;
    if let Some(catalog) = catalog {
        config.catalog.path = Some(catalog);
    }
    Ok(config)
}

fn load(config: &Config) -> anyhow::Result<CatalogLoad> {
    let path = config.catalog_path();
    load_catalog_file(&path, &config.catalog)
        .with_context(|| format!("loading catalog {}", path.display()))
}

fn resolver(config: &Config) -> anyhow::Result<BoardInstructionResolver> {
    let load = load(config)?;
    Ok(BoardInstructionResolver::with_query_param(
        load.catalog,
        config.page.query_param.clone(),
    ))
}

fn handle_resolve(config: &Config, cmd: &ResolveCommand) -> anyhow::Result<()> {
    let resolver = resolver(config)?;

    let result = match (&cmd.name, &cmd.url) {
        (Some(name), _) => resolver.resolve_by_name(name),
        (None, Some(url)) => resolver.resolve_by_query(url),
        (None, None) => anyhow::bail!("a board name or --url is required"),
    };

    // Nothing to show is not a failure of the command
    let mut selection = match result {
        Ok(selection) => selection,
        Err(err) if err.is_not_found() => {
            println!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(label) = &cmd.fw_version {
        selection.select_version(label)?;
    }

    let tab = cmd
        .tab
        .map(Os::from)
        .or_else(|| cmd.user_agent.as_deref().and_then(Os::from_user_agent))
        .or_else(Os::current);

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&selection)?),
        OutputFormat::Html => {
            let regions = render(&selection, config, tab);
            for (id, html) in regions.regions() {
                println!("<!-- #{id} -->");
                println!("{html}");
            }
        }
        OutputFormat::Plain => {
            let board = &selection.board;
            println!("{} ({})", board.name, board.product_code);
            println!("Firmware: {}", selection.display_firmware_name);
            if let Some(chooser) = build_version_chooser(&selection) {
                for (i, (label, file)) in chooser.pairs().enumerate() {
                    let marker = if i == chooser.selected { "*" } else { " " };
                    println!("  {marker} {label:<12} {file}");
                }
            }
            let order = tab.map_or(Os::ALL.to_vec(), |first| {
                std::iter::once(first)
                    .chain(Os::ALL.into_iter().filter(|os| *os != first))
                    .collect()
            });
            for os in order {
                println!();
                println!("[{os}]");
                println!("{}", selection.instructions.get(os));
            }
        }
    }
    Ok(())
}

fn handle_search(config: &Config, cmd: &SearchCommand) -> anyhow::Result<()> {
    let load = load(config)?;
    let mut search = config.search.clone();
    if let Some(limit) = cmd.limit {
        search.max_suggestions = limit.get();
    }

    let found = suggest(&load.catalog, &cmd.query, &search);
    match cmd.format {
        OutputFormat::Json => {
            let names: Vec<&str> = found.iter().map(|b| b.name.as_str()).collect();
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
        OutputFormat::Plain | OutputFormat::Html => {
            if found.is_empty() {
                println!("No boards match \"{}\"", cmd.query);
            }
            for board in found {
                println!("{}", board.name);
            }
        }
    }
    Ok(())
}

fn handle_versions(config: &Config, cmd: &VersionsCommand) -> anyhow::Result<()> {
    let resolver = resolver(config)?;
    let selection = match resolver.resolve_by_name(&cmd.name) {
        Ok(selection) => selection,
        Err(err) if err.is_not_found() => {
            println!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let chooser = build_version_chooser(&selection);
    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&chooser)?),
        OutputFormat::Html => {
            let regions = render(&selection, config, None);
            match regions.chooser {
                Some(html) => println!("{html}"),
                None => println!("{}", regions.firmware),
            }
        }
        OutputFormat::Plain => match chooser {
            Some(chooser) => {
                for (label, file) in chooser.pairs() {
                    println!("{label:<12} {file}");
                }
            }
            None => println!("{}", selection.display_firmware_name),
        },
    }
    Ok(())
}

fn handle_catalog(config: &Config, cmd: &CatalogCommand) -> anyhow::Result<()> {
    let load = load(config)?;
    match cmd {
        CatalogCommand::Check => {
            println!("Boards:    {}", load.catalog.len());
            println!(
                "Defaults:  {}",
                load.catalog.default_keys().collect::<Vec<_>>().join(", ")
            );
            println!("Rejected:  {}", load.rejected.len());
            for err in &load.rejected {
                println!("  - {err}");
            }
            if !load.is_clean() {
                anyhow::bail!("{} malformed record(s)", load.rejected.len());
            }
        }
        CatalogCommand::List { format } => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(load.catalog.boards())?);
            }
            OutputFormat::Plain | OutputFormat::Html => {
                for board in load.catalog.boards() {
                    let firmware = match &board.firmware {
                        FirmwareInfo::None => "-".to_string(),
                        FirmwareInfo::Single(single) => single.stem.clone(),
                        FirmwareInfo::Versioned(versions) => {
                            format!("{} versions", versions.len())
                        }
                    };
                    println!("{:<24} {:<6} {}", board.name, board.product_code, firmware);
                }
            }
        },
    }
    Ok(())
}

fn handle_config(
    path: Option<PathBuf>,
    catalog: Option<PathBuf>,
    cmd: ConfigCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = &load_config(path, catalog)?;
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Catalog]");
                println!("  Path:               {}", config.catalog_path().display());
                println!("  Strict:             {}", config.catalog.strict);
                println!("  Duplicates:         {:?}", config.catalog.duplicates);
                println!();
                println!("[Page]");
                println!("  Base URL:           {}", config.page.base_url);
                println!("  Firmware dir:       {}", config.page.firmware_dir);
                println!("  Query parameter:    {}", config.page.query_param);
                println!();
                println!("[Search]");
                println!("  Max suggestions:    {}", config.search.max_suggestions);
                println!("  Sort:               {}", config.search.sort);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.or(path).unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("invalid configuration {}", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, body: &str) -> PathBuf {
        let file = format!("upguide-{}-{name}.toml", std::process::id());
        let path = std::env::temp_dir().join(file);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_validate_fails_on_invalid_file() {
        let bad = write_config("bad", "[search]\nmax_suggestions = 0\n");
        let validate = ConfigCommand::Validate {
            file: Some(bad.clone()),
        };
        let result = handle_config(None, None, validate);
        assert!(result.is_err());
        std::fs::remove_file(bad).unwrap();
    }

    #[test]
    fn test_validate_ignores_broken_global_config() {
        let bad = write_config("global", "[page]\nquery_param = \"\"\n");
        let good = write_config("good", "[search]\nmax_suggestions = 3\n");
        let result = handle_config(
            Some(bad.clone()),
            None,
            ConfigCommand::Validate {
                file: Some(good.clone()),
            },
        );
        assert!(result.is_ok());
        let own = handle_config(Some(bad.clone()), None, ConfigCommand::Validate { file: None });
        assert!(own.is_err());
        std::fs::remove_file(bad).unwrap();
        std::fs::remove_file(good).unwrap();
    }
}
