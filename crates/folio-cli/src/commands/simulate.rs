use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use folio_core::config::PagingConfig;
use folio_core::paging::{
    Gesture, InputBinding, LayoutProvider, ManualTimer, Outcome, PagingController, PagingState,
    SectionGeometry, SectionOrder, StaticLayout, Viewport,
};
use folio_core::AppConfig;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub viewport: ViewportSpec,
    pub sections: Vec<SectionSpec>,
    pub steps: Vec<Step>,
    /// Overrides the configured paging parameters
    #[serde(default)]
    pub paging: Option<PagingConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ViewportSpec {
    #[serde(default)]
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

/// A section without `top`/`height` is registered but not laid out
#[derive(Debug, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    pub top: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Gesture(Gesture),
    /// Advance the settle clock by this many milliseconds
    Advance(u64),
    /// Move the viewport as a native scroll would
    Scroll(f64),
    /// Report the end of the smooth scroll
    ScrollEnd,
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<StepOutcome>,
    pub active: usize,
    pub scroll_y: f64,
    pub state: PagingState,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum StepOutcome {
    Paged { from: usize, to: usize },
    PassThrough { reason: String },
    Released { released: bool },
}

impl From<Outcome> for StepOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Paged { from, to, .. } => StepOutcome::Paged { from, to },
            Outcome::PassThrough(reason) => StepOutcome::PassThrough {
                reason: reason.to_string(),
            },
        }
    }
}

/// Headless hosts have nothing to attach
struct Headless;

impl InputBinding for Headless {
    fn attach(&mut self) -> folio_core::Result<()> {
        Ok(())
    }

    fn detach(&mut self) -> folio_core::Result<()> {
        Ok(())
    }
}

pub fn replay(scenario: Scenario, defaults: &PagingConfig) -> Result<Vec<StepReport>> {
    let paging = scenario.paging.unwrap_or_else(|| defaults.clone());
    paging.validate()?;
    let order = SectionOrder::new(scenario.sections.iter().map(|s| s.id.as_str()))?;

    let v = &scenario.viewport;
    let mut layout =
        StaticLayout::new(Viewport::new(v.scroll_y, v.width, v.height)).with_jump_on_scroll(true);
    for section in &scenario.sections {
        if let (Some(top), Some(height)) = (section.top, section.height) {
            layout.insert(section.id.as_str().into(), SectionGeometry::new(top, height));
        }
    }

    let mut controller = PagingController::new(order, &paging, ManualTimer::new());
    controller.mount(&mut Headless);

    let mut reports = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.into_iter().enumerate() {
        let (event, outcome) = match step {
            Step::Gesture(gesture) => {
                let outcome = controller.handle(gesture, &mut layout);
                (describe(&gesture), Some(outcome.into()))
            }
            Step::Advance(ms) => {
                let due = controller.timer_mut().advance(Duration::from_millis(ms));
                let mut released = false;
                for ticket in due {
                    released |= controller.settle(ticket);
                }
                (format!("advance {}ms", ms), Some(StepOutcome::Released { released }))
            }
            Step::Scroll(y) => {
                layout.scroll_to(y);
                (format!("scroll {}", y), None)
            }
            Step::ScrollEnd => {
                let released = controller.scroll_finished();
                ("scroll-end".to_string(), Some(StepOutcome::Released { released }))
            }
        };

        reports.push(StepReport {
            step: index,
            event,
            outcome,
            active: controller.active_index(&layout),
            scroll_y: layout.viewport().scroll_y,
            state: controller.state(),
        });
    }

    controller.unmount(&mut Headless);
    Ok(reports)
}

fn describe(gesture: &Gesture) -> String {
    match gesture {
        Gesture::Wheel(w) => format!("wheel {}", w.delta_y),
        Gesture::Key(k) => format!("key {:?}", k.key),
    }
}

pub fn run(config: &AppConfig, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let scenario: Scenario = serde_json::from_str(&text)
        .with_context(|| format!("parsing scenario {}", path.display()))?;

    for report in replay(scenario, &config.paging)? {
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paging() -> PagingConfig {
        PagingConfig {
            reduced_motion: Some(false),
            ..Default::default()
        }
    }

    fn scenario(steps: &str) -> Scenario {
        let text = format!(
            r#"{{
                "viewport": {{ "scroll_y": 0, "width": 1280, "height": 800 }},
                "sections": [
                    {{ "id": "hero", "top": 0, "height": 1000 }},
                    {{ "id": "work", "top": 1000, "height": 1200 }},
                    {{ "id": "about", "top": 2200, "height": 1300 }},
                    {{ "id": "experience", "top": 3500, "height": 1300 }},
                    {{ "id": "contact", "top": 4800, "height": 800 }}
                ],
                "steps": {steps}
            }}"#
        );
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_burst_pages_once() {
        let steps = r#"[
            { "scroll": 200 },
            { "gesture": { "kind": "wheel", "delta_y": 120 } },
            { "gesture": { "kind": "wheel", "delta_y": 120 } },
            { "advance": 750 },
            { "gesture": { "kind": "key", "key": "page-down" } }
        ]"#;
        let reports = replay(scenario(steps), &paging()).unwrap();

        assert_eq!(reports[1].outcome, Some(StepOutcome::Paged { from: 0, to: 1 }));
        assert_eq!(reports[1].scroll_y, 1000.0);
        assert_eq!(reports[1].state, PagingState::Paging);
        assert_eq!(
            reports[2].outcome,
            Some(StepOutcome::PassThrough {
                reason: "paging".to_string()
            })
        );
        assert_eq!(reports[3].outcome, Some(StepOutcome::Released { released: true }));
        assert_eq!(reports[3].state, PagingState::Idle);
        assert_eq!(reports[4].outcome, Some(StepOutcome::Paged { from: 1, to: 2 }));
    }

    #[test]
    fn test_scroll_end_ignored_with_timer_release() {
        let steps = r#"[
            { "scroll": 200 },
            { "gesture": { "kind": "wheel", "delta_y": 120 } },
            "scroll-end"
        ]"#;
        let reports = replay(scenario(steps), &paging()).unwrap();
        assert_eq!(reports[2].outcome, Some(StepOutcome::Released { released: false }));
        assert_eq!(reports[2].state, PagingState::Paging);
    }

    #[test]
    fn test_unlaid_section_passes_through() {
        let text = r#"{
            "viewport": { "scroll_y": 200, "width": 1280, "height": 800 },
            "sections": [
                { "id": "hero", "top": 0, "height": 1000 },
                { "id": "work" }
            ],
            "steps": [ { "gesture": { "kind": "wheel", "delta_y": 120 } } ]
        }"#;
        let scenario: Scenario = serde_json::from_str(text).unwrap();
        let reports = replay(scenario, &paging()).unwrap();
        assert_eq!(
            reports[0].outcome,
            Some(StepOutcome::PassThrough {
                reason: "missing-geometry".to_string()
            })
        );
        assert_eq!(reports[0].state, PagingState::Idle);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let text = r#"{
            "viewport": { "width": 1280, "height": 800 },
            "sections": [ { "id": "hero" }, { "id": "hero" } ],
            "steps": []
        }"#;
        let scenario: Scenario = serde_json::from_str(text).unwrap();
        assert!(replay(scenario, &paging()).is_err());
    }

    #[test]
    fn test_out_of_range_override_rejected() {
        for overrides in [
            r#"{ "reference_ratio": 5 }"#,
            r#"{ "edge_tolerance": -8 }"#,
        ] {
            let text = format!(
                r#"{{
                    "viewport": {{ "width": 1280, "height": 800 }},
                    "sections": [ {{ "id": "hero", "top": 0, "height": 1000 }} ],
                    "steps": [],
                    "paging": {overrides}
                }}"#
            );
            let scenario: Scenario = serde_json::from_str(&text).unwrap();
            assert!(replay(scenario, &paging()).is_err());
        }
    }

    #[test]
    fn test_report_serializes_flat() {
        let reports = replay(scenario("[]"), &paging()).unwrap();
        assert!(reports.is_empty());

        let report = StepReport {
            step: 0,
            event: "scroll-end".to_string(),
            outcome: Some(StepOutcome::Released { released: true }),
            active: 2,
            scroll_y: 2200.0,
            state: PagingState::Idle,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains(r#""result":"released""#));
        assert!(json.contains(r#""state":"idle""#));
    }
}
