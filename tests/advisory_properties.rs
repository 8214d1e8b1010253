use proptest::prelude::*;
use revenue_roi_engine::advisory::{pick_tier_for_risk, recommend_tier, TierProfile};
use revenue_roi_engine::numeric::{clamp_percent, clamp_unit};
use revenue_roi_engine::roi::{calculate_base_roi, ProfitabilityState, RoiInput};
use revenue_roi_engine::tables::Tier;

#[test]
fn epsilon_band_at_thousand() {
    use ProfitabilityState::*;
    assert_eq!(ProfitabilityState::classify(51.0, 1000.0), Profitable);
    assert_eq!(ProfitabilityState::classify(-51.0, 1000.0), Unprofitable);
    assert_eq!(ProfitabilityState::classify(0.0, 1000.0), Breakeven);
    assert_eq!(ProfitabilityState::classify(50.0, 1000.0), Breakeven);
}

#[test]
fn band_edge_goes_up() {
    assert_eq!(pick_tier_for_risk(10_000.0).key, Tier::Growth);
}

proptest! {
    #[test]
    fn clamped_values_stay_in_range(v in proptest::num::f64::ANY) {
        let p = clamp_percent(v);
        let u = clamp_unit(v);
        prop_assert!((0.0..=100.0).contains(&p));
        prop_assert!((0.0..=1.0).contains(&u));
    }

    #[test]
    fn base_result_is_sanitized(
        leads in -1e4f64..1e5,
        deal in -1e4f64..1e6,
        missed in -50f64..200.0,
        close in -50f64..200.0,
        rate in -1f64..3.0,
        investment in -1e4f64..1e5,
    ) {
        let r = calculate_base_roi(&RoiInput {
            industry_key: "plumbing".into(),
            leads_per_month: leads,
            deal_value: deal,
            missed_rate_pct: missed,
            close_rate_pct: close,
            monthly_investment: investment,
            ai_recovery_rate: rate,
            ..RoiInput::default()
        });
        prop_assert!(r.leads_per_month >= 0.0);
        prop_assert!(r.deal_value >= 0.0);
        prop_assert!((0.0..=100.0).contains(&r.missed_rate_pct));
        prop_assert!((0.0..=100.0).contains(&r.close_rate_pct));
        prop_assert!((0.0..=1.0).contains(&r.ai_recovery_rate));
        prop_assert!(r.revenue_recovered_annual <= r.revenue_at_risk_annual + 1e-6);
        prop_assert!(r.roi_percent.is_finite());
        if let Some(pct) = r.break_even.close_rate_pct {
            prop_assert!((0.0..=100.0).contains(&pct));
        }
    }

    #[test]
    fn every_non_negative_risk_has_a_band(risk in 0f64..1e7) {
        let pick = pick_tier_for_risk(risk);
        let expected = if risk < 10_000.0 {
            Tier::Core
        } else if risk < 30_000.0 {
            Tier::Growth
        } else if risk < 75_000.0 {
            Tier::Scale
        } else {
            Tier::Enterprise
        };
        prop_assert_eq!(pick.key, expected);
    }

    #[test]
    fn five_or_more_locations_recommend_enterprise(
        locations in 5u32..500,
        crm in any::<bool>(),
        competitive in any::<bool>(),
        custom in any::<bool>(),
        revenue in 0f64..1e7,
        leads in 0f64..1e4,
    ) {
        let rec = recommend_tier(&TierProfile {
            num_locations: locations,
            has_existing_crm: crm,
            is_competitive_market: competitive,
            needs_custom_workflows: custom,
            monthly_revenue: revenue,
            leads_per_month: leads,
        });
        prop_assert_eq!(rec.tier, Tier::Enterprise);
    }
}
