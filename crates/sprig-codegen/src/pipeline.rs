//! Pipeline entry points: native selection in, code artifacts out.

use crate::colors::{
    collect_colors, gradient_conversions, palette_artifact, solid_conversions,
    LinearGradientConversion, SolidColorConversion,
};
use crate::error::Result;
use crate::generators::{generator_for, HtmlGenerator, HtmlPreview};
use crate::text_styles::aggregate_text_styles;
use serde::Serialize;
use sprig_core::{
    CodeArtifact, Diagnostics, Framework, GenerationMode, IrNode, Language, SceneNode, Settings,
    Warning,
};
use sprig_resolver::build_forest;

/// Everything one invocation returns to the host.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutput {
    pub framework: Framework,
    /// Code block, then text styles, then the palette
    pub artifacts: Vec<CodeArtifact>,
    pub warnings: Vec<Warning>,
    pub preview: HtmlPreview,
    pub colors: Vec<SolidColorConversion>,
    pub gradients: Vec<LinearGradientConversion>,
}

/// Message posted to the host UI.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    Code(RunOutput),
    Error { error: String },
}

/// Build the IR forest for a selection.
pub fn build_ir(
    roots: &[SceneNode],
    parent: Option<&SceneNode>,
    settings: &Settings,
    diag: &mut Diagnostics,
) -> Result<Vec<IrNode>> {
    Ok(build_forest(roots, parent, settings, diag)?)
}

/// Run the selected emitter and append the text-styles and palette blocks
/// when the selection has any.
pub fn emit(
    forest: &[IrNode],
    settings: &Settings,
    diag: &mut Diagnostics,
) -> Result<Vec<CodeArtifact>> {
    let generator = generator_for(settings.framework);
    tracing::debug!(framework = generator.framework_name(), "emitter chosen");

    let mut artifacts = generator.generate(forest, settings, diag)?;

    let groups = aggregate_text_styles(forest);
    if !groups.is_empty() {
        artifacts.push(CodeArtifact::new(
            "Text Styles",
            generator.generate_text_styles(&groups, settings),
            generator.text_styles_language(settings),
        ));
    }

    let colors = collect_colors(forest);
    if !colors.solids.is_empty() {
        artifacts.push(palette_artifact(&colors, settings.framework));
    }

    tracing::debug!(artifacts = artifacts.len(), "artifacts produced");
    Ok(artifacts)
}

/// Convert a selection with the settings' framework.
///
/// Fails only for invocation-level problems such as an empty selection.
pub fn run(
    roots: &[SceneNode],
    parent: Option<&SceneNode>,
    settings: &Settings,
) -> Result<RunOutput> {
    let mut diag = Diagnostics::new();
    let forest = build_ir(roots, parent, settings, &mut diag)?;
    let artifacts = emit(&forest, settings, &mut diag)?;

    let generator = generator_for(settings.framework);
    let used = collect_colors(&forest);
    let preview = HtmlGenerator::new().preview(&forest, settings)?;

    Ok(RunOutput {
        framework: settings.framework,
        artifacts,
        colors: solid_conversions(&used, generator.as_ref()),
        gradients: gradient_conversions(&used, generator.as_ref()),
        warnings: diag.into_warnings(),
        preview,
    })
}

/// [`run`] for the host boundary: errors become an `error` message.
pub fn safe_run(
    roots: &[SceneNode],
    parent: Option<&SceneNode>,
    settings: &Settings,
) -> HostMessage {
    match run(roots, parent, settings) {
        Ok(output) => HostMessage::Code(output),
        Err(err) => {
            tracing::warn!(error = %err, "conversion failed");
            HostMessage::Error {
                error: err.to_string(),
            }
        }
    }
}

/// Artifacts for a host codegen language id.
///
/// Widget targets are always generated as snippets. Unknown ids yield no
/// artifacts.
pub fn codegen_for_language(
    language: &str,
    roots: &[SceneNode],
    settings: &Settings,
) -> Result<Vec<CodeArtifact>> {
    let (framework, jsx) = match language {
        "html" => (Framework::Html, false),
        "html_jsx" => (Framework::Html, true),
        "tailwind" => (Framework::Tailwind, false),
        "tailwind_jsx" => (Framework::Tailwind, true),
        "flutter" => (Framework::Flutter, false),
        "swiftUI" => (Framework::SwiftUI, false),
        _ => {
            tracing::debug!(language, "unknown codegen language");
            return Ok(Vec::new());
        }
    };
    let settings = Settings {
        framework,
        jsx,
        flutter_generation_mode: GenerationMode::Snippet,
        swiftui_generation_mode: GenerationMode::Snippet,
        ..settings.clone()
    };

    let mut diag = Diagnostics::new();
    let forest = build_ir(roots, None, &settings, &mut diag)?;
    let generator = generator_for(framework);
    let code = generator.generate(&forest, &settings, &mut diag)?;
    let styles = generator.generate_text_styles(&aggregate_text_styles(&forest), &settings);

    let mut artifacts = Vec::new();
    match framework {
        Framework::Html => {
            artifacts.extend(code);
            artifacts.push(CodeArtifact::new("Text Styles", styles, Language::Html));
        }
        Framework::Tailwind => {
            artifacts.extend(code);
            artifacts.push(palette_artifact(&collect_colors(&forest), Framework::Tailwind));
            artifacts.push(CodeArtifact::new("Text Styles", styles, Language::Html));
        }
        Framework::Flutter => {
            for artifact in code {
                artifacts.push(CodeArtifact::new(artifact.title, artifact.body, Language::Swift));
            }
            artifacts.push(CodeArtifact::new("Text Styles", styles, Language::Swift));
        }
        Framework::SwiftUI => {
            for artifact in code {
                artifacts.push(CodeArtifact::new("SwiftUI", artifact.body, Language::Swift));
            }
            artifacts.push(CodeArtifact::new("Text Styles", styles, Language::Swift));
        }
    }

    tracing::debug!(
        language,
        artifacts = artifacts.len(),
        warnings = diag.warnings().len(),
        "codegen finished"
    );
    Ok(artifacts)
}
