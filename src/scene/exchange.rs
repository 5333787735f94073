use serde::{Deserialize, Serialize};

use crate::foundation::error::{HypnoError, HypnoResult};
use crate::scene::overlay::{TextOverlay, TextStyle};
use crate::scene::settings::PatternSettings;

/// One exported label: its style plus anchor, without the session-local id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextOverlayDef {
    /// Content and appearance.
    #[serde(flatten)]
    pub style: TextStyle,
    /// Normalized anchor x.
    pub x: f64,
    /// Normalized anchor y.
    pub y: f64,
}

impl From<&TextOverlay> for TextOverlayDef {
    fn from(o: &TextOverlay) -> Self {
        Self {
            style: o.style.clone(),
            x: o.x,
            y: o.y,
        }
    }
}

/// The settings exchange document: `{ "spiral": {..}, "text": [..] }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportedSettings {
    /// Pattern settings.
    pub spiral: PatternSettings,
    /// Labels in paint order.
    pub text: Vec<TextOverlayDef>,
}

/// Serialize settings and labels as pretty JSON.
pub fn export_settings_json(
    settings: &PatternSettings,
    overlays: &[TextOverlay],
) -> HypnoResult<String> {
    let doc = ExportedSettings {
        spiral: settings.clone(),
        text: overlays.iter().map(TextOverlayDef::from).collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse an exchange document.
///
/// `spiral` keys are written over `current` (partial objects are fine); keys that name no
/// setting are skipped. Each `text` entry is written over the stock label template, anchors
/// default to the canvas center. A payload without a `spiral` object or with a non-array
/// `text` is rejected.
pub fn import_settings_json(
    json: &str,
    current: &PatternSettings,
) -> HypnoResult<ExportedSettings> {
    let root: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Object(root) = root else {
        return Err(HypnoError::validation("settings payload must be a JSON object"));
    };

    let spiral = match root.get("spiral") {
        Some(serde_json::Value::Object(patch)) => {
            current.merged(&known_settings_fields(current, patch)?)?
        }
        Some(_) => return Err(HypnoError::validation("\"spiral\" must be an object")),
        None => return Err(HypnoError::validation("missing \"spiral\" settings")),
    };

    let entries = match root.get("text") {
        Some(serde_json::Value::Array(entries)) => entries,
        Some(_) => return Err(HypnoError::validation("\"text\" must be an array")),
        None => return Err(HypnoError::validation("missing \"text\" list")),
    };

    let template = serde_json::to_value(TextOverlayDef {
        style: TextStyle::default(),
        x: 0.5,
        y: 0.5,
    })?;
    let mut text = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let serde_json::Value::Object(patch) = entry else {
            return Err(HypnoError::validation(format!(
                "text entry {i} must be an object"
            )));
        };
        let mut merged = template.clone();
        if let serde_json::Value::Object(m) = &mut merged {
            for (k, v) in patch {
                m.insert(k.clone(), v.clone());
            }
        }
        let def: TextOverlayDef = serde_json::from_value(merged)
            .map_err(|e| HypnoError::serde(format!("text entry {i}: {e}")))?;
        text.push(def);
    }

    Ok(ExportedSettings { spiral, text })
}

fn known_settings_fields(
    current: &PatternSettings,
    patch: &serde_json::Map<String, serde_json::Value>,
) -> HypnoResult<serde_json::Map<String, serde_json::Value>> {
    let serde_json::Value::Object(known) = serde_json::to_value(current)? else {
        return Err(HypnoError::evaluation(
            "settings did not serialize to an object",
        ));
    };
    Ok(patch
        .iter()
        .filter(|(key, _)| {
            let keep = known.contains_key(key.as_str());
            if !keep {
                tracing::debug!(field = %key, "skipping unknown imported setting");
            }
            keep
        })
        .map(|(key, v)| (key.clone(), v.clone()))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/exchange.rs"]
mod tests;
