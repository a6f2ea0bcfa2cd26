// Snapshot heuristic: only the 1h/24h/7d percentage changes are available.
use crate::config::Thresholds;
use crate::model::{MarketSnapshot, TrendAction};

pub const TREND_DISCLAIMER: &str = "Based on public market data and simple heuristics; for reference only, not investment advice.";

#[derive(Debug, Clone, PartialEq)]
pub struct TrendAdvice {
    pub action: TrendAction,
    pub reasons: Vec<String>,
    pub caution: &'static str,
}

pub fn summarize_trend(snapshot: &MarketSnapshot, thresholds: &Thresholds) -> TrendAdvice {
    let one_hour = snapshot.change_1h;
    let day = snapshot.change_24h;
    let week = snapshot.change_7d;

    let mut reasons = vec![
        format!("1h change: {one_hour:+.2}%"),
        format!("24h change: {day:+.2}%"),
        format!("7d change: {week:+.2}%"),
    ];

    let hourly = thresholds.hourly_momentum_pct;
    let daily = thresholds.daily_momentum_pct;
    let action = if one_hour > hourly && day > daily {
        reasons.push("Momentum is positive across multiple timeframes.".into());
        TrendAction::ConsiderBuying
    } else if one_hour < -hourly && day < -daily {
        reasons.push("Downward pressure visible in short-term and daily moves.".into());
        TrendAction::ConsiderReducing
    } else {
        reasons.push("Signals are mixed; waiting for clarity may reduce risk.".into());
        TrendAction::HoldWait
    };

    if week > thresholds.weekly_trend_pct {
        reasons.push("Strong weekly performance suggests upward trend.".into());
    } else if week < -thresholds.weekly_trend_pct {
        reasons.push("Sustained weekly drawdown indicates elevated downside risk.".into());
    }

    TrendAdvice {
        action,
        reasons,
        caution: TREND_DISCLAIMER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(one_hour: f64, day: f64, week: f64) -> MarketSnapshot {
        MarketSnapshot {
            fetched_at: Utc::now(),
            price: 50_000.0,
            high_24h: 51_000.0,
            low_24h: 49_000.0,
            market_cap: 1_000_000.0,
            total_volume: 10_000.0,
            change_1h: one_hour,
            change_24h: day,
            change_7d: week,
        }
    }

    #[test]
    fn positive_momentum_suggests_buying() {
        let advice = summarize_trend(&snapshot(0.5, 1.0, 6.0), &Thresholds::default());
        assert_eq!(advice.action, TrendAction::ConsiderBuying);
        assert!(advice.reasons.iter().any(|r| r.contains("weekly performance")));
        assert_eq!(&advice.reasons[..3], ["1h change: +0.50%", "24h change: +1.00%", "7d change: +6.00%"]);
    }

    #[test]
    fn negative_momentum_suggests_reducing() {
        let advice = summarize_trend(&snapshot(-1.0, -1.0, -8.0), &Thresholds::default());
        assert_eq!(advice.action, TrendAction::ConsiderReducing);
        assert!(advice.reasons.iter().any(|r| r.contains("weekly drawdown")));
        assert_eq!(advice.reasons[2], "7d change: -8.00%");
    }

    #[test]
    fn mixed_moves_hold() {
        let advice = summarize_trend(&snapshot(0.5, -1.0, 0.0), &Thresholds::default());
        assert_eq!(advice.action, TrendAction::HoldWait);
        assert_eq!(advice.reasons.len(), 4);
    }

    #[test]
    fn weekly_note_is_independent_of_action() {
        let advice = summarize_trend(&snapshot(-1.0, -1.0, 7.0), &Thresholds::default());
        assert_eq!(advice.action, TrendAction::ConsiderReducing);
        assert!(advice.reasons.iter().any(|r| r.contains("weekly performance")));
    }

    #[test]
    fn thresholds_are_strict() {
        let advice = summarize_trend(&snapshot(0.25, 0.5, 5.0), &Thresholds::default());
        assert_eq!(advice.action, TrendAction::HoldWait);
        assert_eq!(advice.reasons.len(), 4);
    }
}
