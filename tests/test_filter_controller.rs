use anomaly_rank::config::FilterSettings;
use anomaly_rank::controller::{FilterController, FilterState, QueryCompiler};
use anomaly_rank::filter::{FilterError, RowFilter};
use anomaly_rank::menu::{LogicOp, QuickFilter};
use anomaly_rank::results::ResultEntry;

fn rows() -> Vec<ResultEntry> {
    vec![
        ResultEntry::new(1, "GET", "https://a.test/", 200),
        ResultEntry::new(2, "POST", "https://a.test/login", 200),
        ResultEntry::new(3, "GET", "https://a.test/missing", 404),
        ResultEntry::new(4, "DELETE", "https://a.test/item/1", 500),
    ]
}

#[test]
fn test_quick_filter_append_joins_with_single_and() {
    let mut ctl = FilterController::default();
    ctl.set_text("method:GET");
    ctl.append(&QuickFilter::Status(200));

    assert_eq!(ctl.text(), "method:GET AND status:200");
    assert!(!ctl.text().contains("AND  AND"));
    assert_eq!(ctl.visible_indices(&rows()), vec![0]);
}

#[test]
fn test_operator_then_condition_has_no_implicit_and() {
    let mut ctl = FilterController::default();
    ctl.set_text("method:GET");
    ctl.append_operator(LogicOp::And);
    ctl.append_condition("status:404");
    assert_eq!(ctl.text(), "method:GET AND status:404");
    assert_eq!(ctl.visible_indices(&rows()), vec![2]);
}

#[test]
fn test_state_transitions_follow_text() {
    let mut ctl = FilterController::default();
    assert_eq!(ctl.state(), FilterState::Unfiltered);

    assert_eq!(ctl.set_text("status:>=500"), FilterState::Filtered);
    assert_eq!(ctl.visible_indices(&rows()), vec![3]);

    assert_eq!(ctl.set_text("rank:"), FilterState::Unfiltered);
    assert_eq!(ctl.visible_indices(&rows()).len(), 4);

    assert_eq!(ctl.set_text("method:post"), FilterState::Filtered);
    assert_eq!(ctl.clear(), FilterState::Unfiltered);
}

/// Fails on any query with more than one AND-term, compiles the rest normally
#[derive(Debug)]
struct SingleTermOnly;

impl QueryCompiler for SingleTermOnly {
    fn compile(&self, text: &str) -> Result<RowFilter, FilterError> {
        if text.contains(" AND ") {
            return Err(FilterError::Compile("conjunctions unavailable".into()));
        }
        FilterSettings::default().compile(text)
    }
}

#[test]
fn test_rejected_query_leaves_previous_filter_active() {
    let mut ctl = FilterController::with_compiler(SingleTermOnly);
    ctl.set_text("method:DELETE");
    assert_eq!(ctl.visible_indices(&rows()), vec![3]);

    ctl.append(&QuickFilter::Status(200));
    assert_eq!(ctl.text(), "method:DELETE AND status:200");
    assert_eq!(
        ctl.visible_indices(&rows()),
        vec![3],
        "a failed compile must not replace the active filter"
    );

    ctl.set_text("  ");
    assert_eq!(ctl.state(), FilterState::Unfiltered);
}

#[test]
fn test_long_pasted_url_is_applied() {
    let rows = vec![
        ResultEntry::new(1, "GET", "https://a.test/", 200),
        ResultEntry::new(2, "GET", "https://a.test/b", 200),
    ];
    let mut ctl = FilterController::default();
    ctl.set_text("method:POST");
    assert!(ctl.visible_indices(&rows).is_empty());

    ctl.set_text(format!("url:{} OR method:GET", "a".repeat(5000)));
    assert_eq!(ctl.visible_indices(&rows), vec![0, 1]);

    let many = vec!["a.test"; 300].join(" AND ");
    ctl.set_text(many);
    assert_eq!(ctl.visible_indices(&rows), vec![0, 1]);
}

#[test]
fn test_rows_are_never_reordered() {
    let mut ctl = FilterController::default();
    ctl.set_text("status:200 OR status:500");
    assert_eq!(ctl.visible_indices(&rows()), vec![0, 1, 3]);
}
