//! Brewing performance and cost reports.
//!
//! Performance figures cover completed sessions only.  Missing
//! measurements are skipped rather than counted as zero, so an average
//! is `None` when no session recorded the value.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ingredients::Recipe;
use crate::inventory::{IngredientKind, Inventory};

/// Most sessions shown in a trend or comparison.
pub const RECENT_SESSIONS: usize = 20;

/// Smallest group that gets a per-style efficiency figure.
pub const MIN_STYLE_SESSIONS: usize = 2;

// ── Sessions ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Planning,
    Active,
    Fermenting,
    Conditioning,
    Completed,
    Failed,
}

/// One brew day and what it actually produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrewSession {
    pub batch_name: String,
    /// Name of the recipe brewed.
    pub recipe: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default)]
    pub status: SessionStatus,
    pub brew_date: NaiveDate,
    #[serde(default)]
    pub target_og: Option<f64>,
    #[serde(default)]
    pub actual_batch_size: Option<f64>,
    #[serde(default)]
    pub actual_og: Option<f64>,
    #[serde(default)]
    pub actual_fg: Option<f64>,
    #[serde(default)]
    pub actual_abv: Option<f64>,
    #[serde(default)]
    pub actual_efficiency: Option<f64>,
    #[serde(default)]
    pub fermentation_start: Option<NaiveDate>,
    #[serde(default)]
    pub fermentation_end: Option<NaiveDate>,
}

impl BrewSession {
    pub fn new(batch_name: impl Into<String>, recipe: impl Into<String>, brew_date: NaiveDate) -> Self {
        Self {
            batch_name: batch_name.into(),
            recipe: recipe.into(),
            style: None,
            status: SessionStatus::Planning,
            brew_date,
            target_og: None,
            actual_batch_size: None,
            actual_og: None,
            actual_fg: None,
            actual_abv: None,
            actual_efficiency: None,
            fermentation_start: None,
            fermentation_end: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Whole days between the start and end of fermentation.
    pub fn fermentation_days(&self) -> Option<i64> {
        match (self.fermentation_start, self.fermentation_end) {
            (Some(start), Some(end)) => Some((end - start).num_days()),
            _ => None,
        }
    }
}

fn completed(sessions: &[BrewSession]) -> impl Iterator<Item = &BrewSession> {
    sessions.iter().filter(|s| s.is_completed())
}

/// Completed sessions, newest first.
fn completed_newest_first(sessions: &[BrewSession]) -> Vec<&BrewSession> {
    let mut done: Vec<_> = completed(sessions).collect();
    done.sort_by(|a, b| b.brew_date.cmp(&a.brew_date));
    done
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.into_iter().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

// ── Performance ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub total_sessions: usize,
    pub avg_efficiency: Option<f64>,
    pub avg_og: Option<f64>,
    pub avg_fg: Option<f64>,
    pub avg_abv: Option<f64>,
}

/// Averages over completed sessions, each over the sessions that
/// recorded that value.
pub fn brewing_performance(sessions: &[BrewSession]) -> PerformanceSummary {
    let done: Vec<_> = completed(sessions).collect();
    PerformanceSummary {
        total_sessions: done.len(),
        avg_efficiency: mean(done.iter().filter_map(|s| s.actual_efficiency)),
        avg_og: mean(done.iter().filter_map(|s| s.actual_og)),
        avg_fg: mean(done.iter().filter_map(|s| s.actual_fg)),
        avg_abv: mean(done.iter().filter_map(|s| s.actual_abv)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleEfficiency {
    pub style: String,
    pub sessions: usize,
    pub avg_efficiency: f64,
}

/// Mean efficiency per style, best first.  Styles with fewer than
/// [`MIN_STYLE_SESSIONS`] measured sessions are left out.
pub fn efficiency_by_style(sessions: &[BrewSession]) -> Vec<StyleEfficiency> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for s in completed(sessions) {
        if let (Some(style), Some(eff)) = (s.style.as_deref(), s.actual_efficiency) {
            groups.entry(style).or_default().push(eff);
        }
    }
    let mut out: Vec<_> = groups
        .into_iter()
        .filter(|(_, effs)| effs.len() >= MIN_STYLE_SESSIONS)
        .map(|(style, effs)| StyleEfficiency {
            style: style.to_string(),
            sessions: effs.len(),
            avg_efficiency: effs.iter().sum::<f64>() / effs.len() as f64,
        })
        .collect();
    out.sort_by(|a, b| b.avg_efficiency.total_cmp(&a.avg_efficiency));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgComparison {
    pub batch_name: String,
    pub brew_date: NaiveDate,
    pub target_og: f64,
    pub actual_og: f64,
    /// Actual minus target.
    pub difference: f64,
}

/// Measured OG against the recipe's target for the most recent
/// completed sessions that have both.
pub fn og_vs_target(sessions: &[BrewSession]) -> Vec<OgComparison> {
    completed_newest_first(sessions)
        .into_iter()
        .filter_map(|s| {
            let (target, actual) = (s.target_og?, s.actual_og?);
            Some(OgComparison {
                batch_name: s.batch_name.clone(),
                brew_date: s.brew_date,
                target_og: target,
                actual_og: actual,
                difference: actual - target,
            })
        })
        .take(RECENT_SESSIONS)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyPoint {
    pub brew_date: NaiveDate,
    pub batch_name: String,
    pub efficiency: f64,
}

/// Efficiency of the most recent measured sessions, oldest first.
pub fn efficiency_trend(sessions: &[BrewSession]) -> Vec<EfficiencyPoint> {
    let mut points: Vec<_> = completed_newest_first(sessions)
        .into_iter()
        .filter_map(|s| {
            Some(EfficiencyPoint {
                brew_date: s.brew_date,
                batch_name: s.batch_name.clone(),
                efficiency: s.actual_efficiency?,
            })
        })
        .take(RECENT_SESSIONS)
        .collect();
    points.reverse();
    points
}

/// Sessions per style across every status, most brewed first.
pub fn style_breakdown(sessions: &[BrewSession]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for s in sessions {
        *counts.entry(s.style.as_deref().unwrap_or("Unknown")).or_insert(0) += 1;
    }
    let mut out: Vec<_> = counts.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out.truncate(10);
    out
}

/// Brew days per calendar month for the twelve months ending with
/// `today`'s month, oldest first, keyed `YYYY-MM`.
pub fn monthly_brews(sessions: &[BrewSession], today: NaiveDate) -> Vec<(String, usize)> {
    let (mut year, mut month) = (today.year(), today.month());
    let mut months = Vec::with_capacity(12);
    for _ in 0..12 {
        months.push((year, month));
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    months.reverse();
    months
        .into_iter()
        .map(|(y, m)| {
            let n = sessions
                .iter()
                .filter(|s| s.brew_date.year() == y && s.brew_date.month() == m)
                .count();
            (format!("{y:04}-{m:02}"), n)
        })
        .collect()
}

// ── Costs ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCost {
    pub name: String,
    pub style: Option<String>,
    pub batch_size_liters: f64,
    pub total_cost: f64,
    /// Zero for an empty batch.
    pub cost_per_liter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    pub recipes: Vec<RecipeCost>,
    pub inventory_value: f64,
    pub value_by_kind: BTreeMap<IngredientKind, f64>,
    /// Mean cost per liter of the recipes of each style.
    pub avg_cost_per_liter_by_style: BTreeMap<String, f64>,
}

pub fn cost_analysis(recipes: &[Recipe], inventory: &Inventory) -> CostReport {
    let costs: Vec<_> = recipes
        .iter()
        .map(|r| RecipeCost {
            name: r.name.clone(),
            style: r.style.clone(),
            batch_size_liters: r.targets.batch_size_liters,
            total_cost: r.total_cost(inventory),
            cost_per_liter: r.cost_per_liter(inventory).unwrap_or(0.0),
        })
        .collect();

    let mut by_style: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for c in &costs {
        if let Some(style) = &c.style {
            by_style.entry(style.clone()).or_default().push(c.cost_per_liter);
        }
    }
    let avg_cost_per_liter_by_style = by_style
        .into_iter()
        .filter_map(|(style, v)| Some((style, mean(v)?)))
        .collect();

    CostReport {
        recipes: costs,
        inventory_value: inventory.total_value(),
        value_by_kind: inventory.value_by_kind(),
        avg_cost_per_liter_by_style,
    }
}

// ── Overall statistics ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrewingStats {
    pub total_brews: usize,
    pub total_liters: f64,
    pub avg_efficiency: Option<f64>,
    pub best_efficiency: Option<f64>,
    pub worst_efficiency: Option<f64>,
    /// Gravity figures use only sessions that recorded OG, FG and ABV.
    pub avg_og: Option<f64>,
    pub avg_fg: Option<f64>,
    pub avg_abv: Option<f64>,
    /// Cost of every recipe at current inventory prices.
    pub total_cost: f64,
    pub avg_cost_per_liter: Option<f64>,
    pub avg_fermentation_days: Option<f64>,
    /// Completed share of the finished (completed or failed) sessions, in %.
    pub success_rate: f64,
}

pub fn brewing_stats(sessions: &[BrewSession], recipes: &[Recipe], inventory: &Inventory) -> BrewingStats {
    let done: Vec<_> = completed(sessions).collect();
    let total_liters: f64 = done.iter().filter_map(|s| s.actual_batch_size).sum();

    let effs: Vec<f64> = done.iter().filter_map(|s| s.actual_efficiency).collect();
    let full: Vec<(f64, f64, f64)> = done
        .iter()
        .filter_map(|s| Some((s.actual_og?, s.actual_fg?, s.actual_abv?)))
        .collect();

    let total_cost: f64 = recipes.iter().map(|r| r.total_cost(inventory)).sum();
    let failed = sessions.iter().filter(|s| s.status == SessionStatus::Failed).count();
    let finished = done.len() + failed;

    let stats = BrewingStats {
        total_brews: done.len(),
        total_liters,
        avg_efficiency: mean(effs.iter().copied()),
        best_efficiency: effs.iter().copied().reduce(f64::max),
        worst_efficiency: effs.iter().copied().reduce(f64::min),
        avg_og: mean(full.iter().map(|g| g.0)),
        avg_fg: mean(full.iter().map(|g| g.1)),
        avg_abv: mean(full.iter().map(|g| g.2)),
        total_cost,
        avg_cost_per_liter: (total_liters > 0.0).then(|| total_cost / total_liters),
        avg_fermentation_days: mean(done.iter().filter_map(|s| s.fermentation_days()).map(|d| d as f64)),
        success_rate: if finished == 0 { 0.0 } else { done.len() as f64 / finished as f64 * 100.0 },
    };
    tracing::debug!(brews = stats.total_brews, liters = stats.total_liters, "brewing statistics computed");
    stats
}
