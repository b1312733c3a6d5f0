use chrono::NaiveDate;
use wedding_budget_engine::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn pending(id: &str, amount: f64, due: Option<NaiveDate>) -> Payment {
    Payment {
        id: id.to_string(),
        label: None,
        amount,
        due_date: due,
        status: PaymentStatus::Pending,
        paid_date: None,
    }
}

fn paid(id: &str, amount: f64, on: NaiveDate) -> Payment {
    Payment {
        id: id.to_string(),
        label: None,
        amount,
        due_date: Some(on),
        status: PaymentStatus::Paid,
        paid_date: Some(on),
    }
}

fn sample_categories() -> Vec<Category> {
    vec![
        Category {
            id: "cat-venue".to_string(),
            name: "Venue".to_string(),
            target_amount: 65_000.0,
            sort_order: 1,
            line_items: vec![LineItem {
                id: "li-estate".to_string(),
                name: "Estate rental".to_string(),
                vendor_name: Some("Hillcrest Estate".to_string()),
                actual_cost: 60_000.0,
                paid_to_date: 0.0,
                payments: vec![
                    paid("venue-deposit", 20_000.0, date(2025, 10, 1)),
                    pending("venue-second", 20_000.0, Some(date(2026, 3, 1))),
                    pending("venue-final", 20_000.0, Some(date(2026, 8, 12))),
                ],
            }],
        },
        Category {
            id: "cat-photo".to_string(),
            name: "Photography".to_string(),
            target_amount: 22_500.0,
            sort_order: 2,
            line_items: vec![LineItem {
                id: "li-photo".to_string(),
                name: "Studio Lumen".to_string(),
                vendor_name: None,
                actual_cost: 18_000.0,
                paid_to_date: 0.0,
                payments: vec![
                    paid("photo-retainer", 4_500.0, date(2025, 11, 15)),
                    pending("photo-balance", 13_500.0, Some(date(2026, 2, 20))),
                ],
            }],
        },
        Category {
            id: "cat-florals".to_string(),
            name: "Florals & Decor".to_string(),
            target_amount: 25_000.0,
            sort_order: 3,
            line_items: vec![LineItem {
                id: "li-florals".to_string(),
                name: "Petal & Stem".to_string(),
                vendor_name: None,
                actual_cost: 9_000.0,
                paid_to_date: 2_000.0,
                payments: vec![],
            }],
        },
        Category {
            id: "cat-misc".to_string(),
            name: "Miscellaneous".to_string(),
            target_amount: 0.0,
            sort_order: 4,
            line_items: vec![LineItem {
                id: "li-misc".to_string(),
                name: "Tips".to_string(),
                vendor_name: None,
                actual_cost: 1_200.0,
                paid_to_date: 0.0,
                payments: vec![pending("tips", 1_200.0, None)],
            }],
        },
    ]
}

#[test]
fn test_luxury_template_selection() {
    let total_budget = 250_000.0;
    let level = get_wedding_level_for_budget(total_budget);
    assert_eq!(level, WeddingLevel::Luxury);

    let plan = calculate_allocations(level, total_budget);
    assert!(!plan.is_fallback());
    verify_allocation_sum(&plan).unwrap();
    assert_eq!(plan.amount_for(BudgetCategory::Venue), 65_000.0);
    assert_eq!(plan.amount_for(BudgetCategory::WeddingPlanner), 10_000.0);
    assert_eq!(plan.allocated_total(), 250_000.0);

    let wedding = date(2026, 9, 12);
    let milestones = schedule_milestones(level, wedding);
    assert!(milestones
        .iter()
        .any(|m| m.template.title == "Hire a wedding planner"));
    assert!(!milestones
        .iter()
        .any(|m| m.template.title == "Production walkthrough"));

    let (start, end) = timeline_window(&milestones, wedding);
    assert_eq!(start, date(2025, 9, 12));
    assert_eq!(end, wedding);

    let mut last_position = 0.0;
    for m in &milestones {
        let position = m.gantt_position(start, end);
        assert!((0.0..=100.0).contains(&position));
        assert!(
            position >= last_position,
            "{} at {} moved backwards",
            m.template.title,
            m.target_date
        );
        last_position = position;

        if let Some(name) = &m.template.category_name {
            assert!(BudgetCategory::from_name(name).is_some());
        }
    }

    println!("✓ Luxury template selection test passed");
}

#[test]
fn test_milestone_sets_grow_with_level() {
    let sizes: Vec<usize> = WeddingLevel::ALL
        .iter()
        .map(|level| get_default_milestones_for_level(*level).len())
        .collect();

    for pair in sizes.windows(2) {
        assert!(pair[0] <= pair[1], "sizes not monotonic: {:?}", sizes);
    }
    assert!(sizes[0] < sizes[4]);
}

#[test]
fn test_unknown_level_degrades() {
    let plan = calculate_allocations_for_id("bespoke", 120_000.0);
    assert!(plan.is_fallback());
    assert!(plan.allocations.iter().all(|a| a.amount == 0.0));
    assert!(verify_allocation_sum(&plan).is_err());

    let milestones = get_default_milestones_for_id("bespoke");
    assert_eq!(milestones, get_default_milestones_for_level(WeddingLevel::Diy));
}

#[test]
fn test_date_properties() {
    assert_eq!(calculate_target_date(date(2025, 12, 20), 3.0), date(2025, 9, 20));
    assert_eq!(calculate_target_date(date(2025, 12, 20), 0.5), date(2025, 12, 5));
    assert_eq!(calculate_target_date(date(2025, 12, 20), 12.0), date(2024, 12, 20));

    assert_eq!(get_months_between(date(2025, 6, 15), date(2025, 6, 15)), 0.0);
    assert_eq!(get_months_between(date(2024, 6, 15), date(2025, 6, 15)), 12.0);

    assert_eq!(format_relative_months(12.0), "1 year before");
    assert_eq!(format_relative_months(1.0), "1 month before");
    assert_eq!(format_relative_months(2.0), "2 months before");
    assert_eq!(format_relative_months(0.5), "2 weeks before");
    assert_eq!(format_relative_months(0.25), "1 week before");
}

#[test]
fn test_numeric_round_trip() {
    for x in [0.1 + 0.2, 1.005, 99.999, 42.0, 1_234_567.891, 0.0] {
        assert_eq!(parse_numeric_input(&sanitize_numeric_string(x)), round2(x));
    }
    assert_eq!(format_currency(parse_numeric_input("$12,500")), "$12,500.00");
}

#[test]
fn test_dashboard_with_frozen_today() {
    let categories = sample_categories();
    let config = DashboardConfig {
        total_budget: 250_000.0,
        wedding_date: date(2026, 9, 12),
        today: date(2026, 2, 16),
    };

    let dashboard = DashboardProcessor::build(&categories, &config);

    assert_eq!(dashboard.position.total_committed, 88_200.0);
    assert_eq!(dashboard.position.total_paid, 26_500.0);
    assert_eq!(dashboard.position.total_pending, 61_700.0);
    assert_eq!(dashboard.position.uncommitted, 161_800.0);

    let names: Vec<&str> = dashboard
        .category_allocations
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Venue", "Photography", "Florals & Decor"]);

    let ids: Vec<&str> = dashboard
        .payment_schedule
        .iter()
        .map(|p| p.payment_id.as_str())
        .collect();
    assert_eq!(ids, vec!["photo-balance", "venue-second", "venue-final", "tips"]);
    assert_eq!(dashboard.payment_schedule[0].urgency, Urgency::ThisWeek);
    assert_eq!(dashboard.payment_schedule[0].vendor_name, "Studio Lumen");
    assert_eq!(dashboard.payment_schedule[1].vendor_name, "Hillcrest Estate");
    assert_eq!(dashboard.payment_schedule[1].label, "Payment 2");
    assert_eq!(dashboard.payment_schedule[3].urgency, Urgency::NoDate);

    // Oct 2025 through Aug 2026
    assert_eq!(dashboard.cash_flow.len(), 11);
    let paid_total: f64 = dashboard.cash_flow.iter().map(|p| p.paid).sum();
    let upcoming_total: f64 = dashboard.cash_flow.iter().map(|p| p.upcoming).sum();
    assert_eq!(paid_total, 24_500.0);
    assert_eq!(upcoming_total, 53_500.0);

    let later = DashboardConfig {
        today: date(2026, 3, 2),
        ..config
    };
    let dashboard = DashboardProcessor::build(&categories, &later);
    assert_eq!(dashboard.payment_schedule[0].payment_id, "photo-balance");
    assert_eq!(dashboard.payment_schedule[0].urgency, Urgency::Overdue);
    assert_eq!(dashboard.payment_schedule[1].urgency, Urgency::Overdue);

    println!("✓ Dashboard frozen-today test passed");
}

#[test]
fn test_over_budget_is_available_unclamped() {
    let categories = sample_categories();
    let dashboard = DashboardProcessor::build(
        &categories,
        &DashboardConfig {
            total_budget: 80_000.0,
            wedding_date: date(2026, 9, 12),
            today: date(2026, 1, 1),
        },
    );

    assert_eq!(dashboard.position.uncommitted, 0.0);
    assert_eq!(dashboard.position.total_committed - dashboard.position.total_budget, 8_200.0);
    assert_eq!(dashboard.over_budget, 8_200.0);
    assert_eq!(dashboard.over_paid, 0.0);
}

#[test]
fn test_store_json_round_trip() -> anyhow::Result<()> {
    let json = serde_json::to_string(&sample_categories())?;
    let loaded = load_categories_from_json(&json)?;
    assert_eq!(loaded, sample_categories());

    let store_rows = r#"[
        {"name": "Catering", "target_amount": "18,000.00", "sort_order": 2, "line_items": [
            {"name": "Harvest Table", "actual_cost": "16500", "paid_to_date": "0", "payments": [
                {"id": "c1", "amount": "4125.10", "due_date": "2026-01-10",
                 "status": "paid", "paid_date": "2026-01-08"},
                {"id": "c2", "amount": "12374.90", "due_date": null,
                 "status": "pending", "paid_date": null}
            ]}
        ]},
        {"name": "Venue", "target_amount": 30000, "sort_order": 1, "line_items": []}
    ]"#;

    let categories = load_categories_from_json(store_rows)?;
    assert_eq!(categories[0].name, "Venue");
    assert_eq!(categories[1].actual_spend(), 16_500.0);

    let position = build_paid_vs_remaining_data(&categories, 45_000.0);
    assert_eq!(position.total_paid, 4_125.1);
    assert_eq!(position.total_pending, 12_374.9);
    assert_eq!(position.uncommitted, 28_500.0);

    Ok(())
}

#[test]
fn test_cash_flow_csv_export() -> anyhow::Result<()> {
    let series = build_cash_flow_data(&sample_categories(), date(2026, 9, 12), date(2026, 2, 16));

    let mut writer = csv::Writer::from_writer(vec![]);
    for point in &series {
        writer.serialize(point)?;
    }
    let output = String::from_utf8(writer.into_inner().unwrap())?;

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "month,key,label,paid,upcoming");
    assert_eq!(lines.len(), series.len() + 1);
    assert!(lines[1].starts_with("2025-10-01,2025-10,Oct 2025,"));
    assert!(output.contains("Dec 2025"), "gap month missing:\n{}", output);

    Ok(())
}
