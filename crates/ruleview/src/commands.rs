use crate::cli::{Cli, Command, ViewArgs};
use anyhow::{Context, Result};
use ruleview_core::{
    CatalogValidator, PatternValidationRequest, PatternValidationResult, PatternValidator,
    RuleTreeView, ViewConfig, ViewConfigStore,
};
use ruleview_export::ExportFormat;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use uuid::Uuid;

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Tree { input, view } => {
            let result = read_result(&input)?;
            render(config, &result, &view)
        }

        Command::Validate {
            catalog,
            include,
            exclude,
            data_source,
            rule_set,
            report,
            view,
        } => {
            let validator = CatalogValidator::from_path(&catalog)
                .with_context(|| format!("loading catalog {}", catalog.display()))?;

            let request = PatternValidationRequest {
                rule_set_id: rule_set.unwrap_or_else(Uuid::new_v4),
                data_source_id: data_source,
                include_patterns: include,
                exclude_patterns: exclude,
            };
            let result = validator.validate(&request)?;

            if report {
                let mut stdout = io::stdout().lock();
                serde_json::to_writer_pretty(&mut stdout, &result)?;
                writeln!(stdout)?;
                return Ok(());
            }

            render(config, &result, &view)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ViewConfig> {
    let store = match path {
        Some(path) => ViewConfigStore::from_path(path.to_path_buf()),
        None => ViewConfigStore::new()?,
    };

    log::debug!("Loading view config from {}", store.path().display());
    Ok(store.load()?)
}

fn read_result(input: &Path) -> Result<PatternValidationResult> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?
    };

    serde_json::from_str(&content).context("parsing validation result")
}

fn render(config: ViewConfig, result: &PatternValidationResult, args: &ViewArgs) -> Result<()> {
    let mut view = RuleTreeView::new(config);
    view.rebuild_from_result(result)?;

    let mut filter = view.filter().clone();
    if let Some(term) = &args.search {
        filter.search_term = term.clone();
    }
    if let Some(kind) = args.kind {
        filter.type_filter = kind;
    }
    if let Some(matched_only) = args.matched_only {
        filter.matched_only = matched_only;
    }
    view.set_filter(filter);

    if args.expand_all {
        view.expand_all();
    }

    for warning in view.warnings() {
        log::warn!("{}", warning);
    }

    let format = ExportFormat::from(args.format);
    let filtered = view.filtered();
    let mut stdout = io::stdout().lock();
    ruleview_export::export(&filtered, format, Some(view.expansion()), &mut stdout)?;
    stdout.flush()?;

    log::info!("{}", view.stats().summary());
    Ok(())
}
