//! Subcommand handlers

use crate::args::Assignment;
use crate::render;
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use indexmap::IndexSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use stratcmp_core::{SessionConfig, SessionError, Workspace};
use stratcmp_history::{FileStore, HistoryLog, KeyValueStore, MemoryStore};

/// Config file named by `--config` at any subcommand level
#[must_use]
pub fn config_path(matches: &ArgMatches) -> Option<PathBuf> {
    let mut found = matches.get_one::<PathBuf>("config").cloned();
    let mut current = matches;
    while let Some((_, sub)) = current.subcommand() {
        if let Some(path) = sub.get_one::<PathBuf>("config") {
            found = Some(path.clone());
        }
        current = sub;
    }
    found
}

/// Load the configuration named on the command line, or the default
///
/// # Errors
/// Returns error if the named file cannot be read or parsed
pub fn load_config(matches: &ArgMatches) -> Result<SessionConfig> {
    match config_path(matches) {
        Some(path) => SessionConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

/// Dispatch a parsed command line
///
/// # Errors
/// Returns error on unreadable input, invalid indices or history failures
pub fn run(matches: &ArgMatches, config: SessionConfig, out: &mut dyn Write) -> Result<()> {
    match matches.subcommand() {
        Some(("tree", args)) => {
            let ws = load_workspace(args, config)?;
            write!(out, "{}", render::tree(&ws))?;
        }
        Some(("compare", args)) => {
            let mut ws = load_workspace(args, config)?;
            let baseline = baseline(args);
            let selection = selection(args, &ws, baseline, &[]);
            let result = ws.compare(baseline, &selection, args.get_flag("only-diff"))?;
            write!(out, "{}", render::table(result))?;
        }
        Some(("edit", args)) => edit(args, config, out)?,
        Some(("history", args)) => history(args, &config, out)?,
        _ => bail!("no subcommand given"),
    }
    Ok(())
}

fn load_workspace(args: &ArgMatches, config: SessionConfig) -> Result<Workspace> {
    let mut ws = Workspace::new(config);
    for path in args.get_many::<PathBuf>("files").into_iter().flatten() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        ws.add_document(path.display().to_string(), &text)?;
    }
    Ok(ws)
}

fn baseline(args: &ArgMatches) -> usize {
    args.get_one::<usize>("baseline").copied().unwrap_or(0)
}

/// Explicit `--select`, else `fallback` when given, else the baseline and
/// the first strategies after it up to the configured limit
fn selection(
    args: &ArgMatches,
    ws: &Workspace,
    baseline: usize,
    fallback: &[usize],
) -> Vec<usize> {
    if let Some(selected) = args.get_many::<usize>("select") {
        return selected.copied().collect();
    }
    if !fallback.is_empty() {
        return fallback.to_vec();
    }
    let all: IndexSet<usize> = std::iter::once(baseline)
        .chain(0..ws.strategies().len())
        .collect();
    all.into_iter().take(ws.config().max_selection).collect()
}

fn edit(args: &ArgMatches, config: SessionConfig, out: &mut dyn Write) -> Result<()> {
    let mut ws = load_workspace(args, config)?;
    let assignments: Vec<&Assignment> = args
        .get_many::<Assignment>("set")
        .into_iter()
        .flatten()
        .collect();

    let baseline = baseline(args);
    let targets: IndexSet<usize> = assignments.iter().map(|a| a.strategy).collect();
    let targets: Vec<usize> = targets.into_iter().collect();
    let selection = selection(args, &ws, baseline, &targets);

    if let Some(missing) = targets
        .iter()
        .find(|&&t| t != baseline && !selection.contains(&t))
    {
        bail!("strategy {missing} is edited but not part of --select");
    }

    let comparison = ws.compare(baseline, &selection, false)?;
    if let Some(unknown) = assignments.iter().find(|a| comparison.row(&a.key).is_none()) {
        bail!(
            "parameter {} is not a row of the comparison; only existing parameters are recorded in history",
            unknown.key
        );
    }
    for a in &assignments {
        let change = ws.set_value(a.strategy, &a.key, &a.value)?;
        let name = ws.strategy(a.strategy).map_or("?", |s| s.name());
        writeln!(
            out,
            "[{}] {name} {}: {} -> {}",
            a.strategy,
            a.key,
            change.previous.as_deref().unwrap_or("(new)"),
            a.value
        )?;
    }

    let saved = match args.get_one::<PathBuf>("history-dir") {
        Some(dir) => {
            let log = ws.history_log(FileStore::new(dir));
            save(&mut ws, &log, out)?
        }
        None => {
            let log = ws.history_log(MemoryStore::new());
            save(&mut ws, &log, out)?
        }
    };

    if let Some(dir) = args.get_one::<PathBuf>("out-dir") {
        write_documents(&ws, dir)?;
        writeln!(out, "edited documents written to {}", dir.display())?;
    }
    if !saved {
        tracing::info!("edits left every value unchanged");
    }
    Ok(())
}

/// Save pending changes and print their scripts; `false` when nothing changed
fn save<S: KeyValueStore>(
    ws: &mut Workspace,
    log: &HistoryLog<S>,
    out: &mut dyn Write,
) -> Result<bool> {
    match ws.save_history(log) {
        Ok((position, block)) => {
            write!(out, "{}", render::history_block(position, &block))?;
            Ok(true)
        }
        Err(SessionError::NothingToSave) => {
            writeln!(out, "nothing to save")?;
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

fn write_documents(ws: &Workspace, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    for (position, document) in ws.documents().iter().enumerate() {
        let Some(text) = ws.export_document(position) else {
            continue;
        };
        let file_name = Path::new(document.source())
            .file_name()
            .map_or_else(|| format!("document-{position}.txt").into(), ToOwned::to_owned);
        let path = dir.join(file_name);
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn history(args: &ArgMatches, config: &SessionConfig, out: &mut dyn Write) -> Result<()> {
    let Some((name, sub)) = args.subcommand() else {
        bail!("no history subcommand given");
    };
    let dir = sub
        .get_one::<PathBuf>("history-dir")
        .context("--history-dir is required")?;
    let log = HistoryLog::new(FileStore::new(dir), config.history_slot.clone());

    match name {
        "list" => {
            let blocks = log.load();
            if blocks.is_empty() {
                writeln!(out, "history is empty")?;
            }
            for (position, block) in blocks.iter().enumerate() {
                write!(out, "{}", render::history_block(position, block))?;
            }
        }
        "remove" => {
            let position = sub.get_one::<usize>("position").copied().unwrap_or(0);
            let removed = log.remove(position)?;
            writeln!(out, "removed #{position} saved {}", removed.saved_at)?;
        }
        "clear" => {
            log.clear()?;
            writeln!(out, "history cleared")?;
        }
        other => bail!("unknown history subcommand {other}"),
    }
    Ok(())
}
