//! Command implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use seedxml_export::Exporter;
use seedxml_model::{
    AccessPolicy, DuplicatePolicy, EntityRef, ExportMode, ExportOptions, RECOMMENDED_MAX_DEPTH,
};
use seedxml_store::{AnonymizerRegistry, MemoryStore};

use crate::cli::{ExportArgs, ModelsArgs};
use crate::types::{DocumentReport, ExportReport, ModelRow};

pub fn run_export(args: &ExportArgs) -> Result<ExportReport> {
    let store = load_store(&args.fixture)?;
    let options = export_options(args);
    if options.max_depth > RECOMMENDED_MAX_DEPTH {
        warn!(
            depth = options.max_depth,
            "related records can fan out rapidly beyond depth {RECOMMENDED_MAX_DEPTH}; \
             the export may get expensive"
        );
    }

    let anonymizer = AnonymizerRegistry::new();
    let exporter = Exporter::new(&store, &store, &anonymizer, options);
    let (root, output) = match (&args.xid, &args.model, args.id) {
        (Some(xid), _, _) => (xid.clone(), exporter.export_by_external_id(xid)?),
        (None, Some(model), Some(id)) => {
            let root = EntityRef::new(model.clone(), id);
            let output = exporter.export(&root)?;
            (root.to_string(), output)
        }
        _ => bail!("a root record is required: pass --xid, or --model together with --id"),
    };

    if !args.dry_run {
        fs::create_dir_all(&args.output_dir)
            .with_context(|| format!("create {}", args.output_dir.display()))?;
    }
    let mut documents = Vec::with_capacity(output.documents.len());
    for document in &output.documents {
        let path = if args.dry_run {
            None
        } else {
            let path = args.output_dir.join(&document.file_name);
            fs::write(&path, &document.content)
                .with_context(|| format!("write {}", path.display()))?;
            info!(file = %path.display(), records = document.records, "document written");
            Some(path)
        };
        documents.push(DocumentReport {
            model: document.model.clone(),
            file_name: document.file_name.clone(),
            records: document.records,
            suppressed_fields: document.suppressed_fields,
            path,
            content: args.dry_run.then(|| document.content.clone()),
        });
    }

    Ok(ExportReport {
        root,
        dry_run: args.dry_run,
        output_dir: (!args.dry_run).then(|| args.output_dir.clone()),
        cycles_detected: output.cycles_detected,
        documents,
    })
}

pub fn run_models(args: &ModelsArgs) -> Result<Vec<ModelRow>> {
    let store = load_store(&args.fixture)?;
    let rows = store
        .model_names()
        .map(|model| ModelRow {
            model: model.to_string(),
            fields: store.field_count(model),
            entities: store.entity_count(model),
        })
        .collect();
    Ok(rows)
}

fn load_store(fixture: &Path) -> Result<MemoryStore> {
    let json = fs::read_to_string(fixture)
        .with_context(|| format!("read {}", fixture.display()))?;
    MemoryStore::from_json(&json).with_context(|| format!("parse {}", fixture.display()))
}

fn export_options(args: &ExportArgs) -> ExportOptions {
    ExportOptions::new()
        .with_max_depth(args.depth)
        .with_mode(if args.demo {
            ExportMode::Demo
        } else {
            ExportMode::Real
        })
        .with_duplicates(if args.keep_duplicates {
            DuplicatePolicy::Emit
        } else {
            DuplicatePolicy::Skip
        })
        .with_access(if args.lenient_access {
            AccessPolicy::Lenient
        } else {
            AccessPolicy::Strict
        })
        .with_field_denylist(args.exclude_field.clone())
}
