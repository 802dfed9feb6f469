//! Command execution.

use extract_require::lang::registered_languages;
use extract_require::{run_with_shape, ExtractConfig, JavaScriptRequireFinder, PayloadShape};

use crate::cli::args::ExtractArgs;
use crate::cli::config_layer::build_config;

/// Read stdin, extract references and write the payload to stdout
pub async fn extract_command(args: ExtractArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    tracing::debug!(
        language = %config.language,
        word = %config.word,
        include_expressions = config.include_expressions,
        "effective configuration"
    );

    let mut finder = JavaScriptRequireFinder::from_config(&config)?;
    let shape = PayloadShape::from_include_expressions(config.include_expressions);

    let mut stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    run_with_shape(&mut stdin, &mut stdout, &mut finder, shape).await?;

    Ok(())
}

/// Print default configuration in YAML format
pub fn print_default_config() -> anyhow::Result<()> {
    let yaml = ExtractConfig::default().to_yaml_string()?;
    print!("{}", yaml);
    Ok(())
}

/// List the grammars compiled into this build
pub fn list_languages() {
    for info in registered_languages() {
        let extensions = info
            .extensions
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:<4} {:<11} {}", info.key, info.name, extensions);
    }
}
