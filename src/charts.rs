//! Renderable chart specifications, serialized in the shape Plotly.js expects
//! for a figure (`{data, layout}`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TraceMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Vec<String>,
    pub y: Values,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    Lines,
    Markers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Values {
    Numbers(Vec<f64>),
    Labels(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Axis {
    pub fn titled(text: &str) -> Self {
        Self {
            title: Some(Title { text: text.to_string() }),
            kind: None,
        }
    }

    pub fn category(text: &str) -> Self {
        Self {
            kind: Some("category".to_string()),
            ..Self::titled(text)
        }
    }
}

impl Figure {
    /// A figure with only a title and no traces, used when the day has no data.
    pub fn no_data(title: String) -> Self {
        Self {
            data: Vec::new(),
            layout: Layout {
                title: Some(Title { text: title }),
                ..Layout::default()
            },
        }
    }

    pub fn new(title: String, xaxis: Axis, yaxis: Axis) -> Self {
        Self {
            data: Vec::new(),
            layout: Layout {
                title: Some(Title { text: title }),
                xaxis: Some(xaxis),
                yaxis: Some(yaxis),
            },
        }
    }

    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.data.push(trace);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.layout.title.as_ref().map(|t| t.text.as_str())
    }

    /// True for the blank figure rendered on failure.
    pub fn is_blank(&self) -> bool {
        self.data.is_empty() && self.layout == Layout::default()
    }
}

impl Trace {
    pub fn line(name: &str, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            kind: TraceKind::Scatter,
            mode: Some(TraceMode::Lines),
            name: Some(name.to_string()),
            x,
            y: Values::Numbers(y),
            marker: None,
        }
    }

    pub fn markers(name: &str, x: Vec<String>, y: Vec<String>, color: &str) -> Self {
        Self {
            kind: TraceKind::Scatter,
            mode: Some(TraceMode::Markers),
            name: Some(name.to_string()),
            x,
            y: Values::Labels(y),
            marker: Some(Marker { color: color.to_string() }),
        }
    }

    pub fn bar(x: Vec<String>, y: Vec<f64>, color: &str) -> Self {
        Self {
            kind: TraceKind::Bar,
            mode: None,
            name: None,
            x,
            y: Values::Numbers(y),
            marker: Some(Marker { color: color.to_string() }),
        }
    }
}
