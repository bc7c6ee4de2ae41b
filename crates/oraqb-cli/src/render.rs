use crate::cli::RenderArgs;
use crate::config::{ColumnTypes, ProjectConfig};
use oraqb::{QueryAssembler, QueryDescriptor, SchemaTypeCache};
use std::path::Path;

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let project = ProjectConfig::load(args.config)?;
    let db = &project.file.database;
    tracing::debug!(
        config = %project.config_path.display(),
        alias = %db.alias,
        schema = db.schema.as_deref().unwrap_or(""),
        "loaded config"
    );

    let assembler = QueryAssembler::with_schema(db.schema.clone());
    let mut cache = seeded_cache(&project.file.column_types);

    let many = args.files.len() > 1;
    for path in &args.files {
        let sql = render_file(path, &assembler, &mut cache)?;
        if many {
            println!("-- {}", path.display());
        }
        println!("{}", sql.as_deref().unwrap_or("-- no query"));
    }

    Ok(())
}

/// Offline cache holding only the configured column types.
///
/// Rendering never connects, so the cache always keeps its entries across
/// descriptors regardless of the configured policy.
fn seeded_cache(column_types: &ColumnTypes) -> SchemaTypeCache {
    let mut cache = SchemaTypeCache::new();
    for (table, columns) in column_types {
        cache.seed(table.clone(), columns.iter().map(|(c, t)| (c.clone(), t.as_str())));
    }
    tracing::debug!(tables = cache.len(), "seeded column types");
    cache
}

fn render_file(
    path: &Path,
    assembler: &QueryAssembler,
    cache: &mut SchemaTypeCache,
) -> anyhow::Result<Option<String>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    render_descriptor(&raw, assembler, cache)
        .map_err(|e| anyhow::anyhow!("{}: {e:#}", path.display()))
}

fn render_descriptor(
    raw: &str,
    assembler: &QueryAssembler,
    cache: &mut SchemaTypeCache,
) -> anyhow::Result<Option<String>> {
    let query: QueryDescriptor = serde_json::from_str(raw)
        .map_err(|e| anyhow::anyhow!("invalid query descriptor: {e}"))?;
    let sql = assembler.assemble(&query, cache);
    if sql.is_none() {
        tracing::info!("descriptor has no table; nothing to render");
    }
    Ok(sql)
}
