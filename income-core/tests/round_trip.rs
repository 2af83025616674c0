//! Re-opening a stored statement and submitting it unchanged must reproduce
//! the stored body.

use income_core::models::{IncomeStatement, IncomeStatementForm};
use income_core::validation::from_body;
use pretty_assertions::assert_eq;

fn stored_statements() -> Vec<IncomeStatement> {
    let json = include_str!("fixtures/statements.json");
    serde_json::from_str(json).expect("fixture should deserialize")
}

#[test]
fn fixture_covers_every_statement_type() {
    let types: Vec<_> = stored_statements()
        .iter()
        .map(|s| s.body.statement_type().as_str())
        .collect();

    assert_eq!(types, vec!["HIGHEST_FEE", "CHILD_INCOME", "INCOME"]);
}

#[test]
fn reopened_statement_resubmits_as_draft() {
    for statement in stored_statements() {
        let form = IncomeStatementForm::from_income_statement(&statement);

        assert_eq!(
            from_body(statement.person_type, &form, true),
            Ok(statement.body.clone()),
            "statement {}",
            statement.id
        );
    }
}

#[test]
fn reopened_statement_resubmits_once_assured() {
    for statement in stored_statements() {
        let form = IncomeStatementForm {
            assure: true,
            ..IncomeStatementForm::from_income_statement(&statement)
        };

        assert_eq!(
            from_body(statement.person_type, &form, false),
            Ok(statement.body.clone()),
            "statement {}",
            statement.id
        );
    }
}

#[test]
fn reopened_form_is_never_assured() {
    for statement in stored_statements() {
        assert!(!IncomeStatementForm::from_income_statement(&statement).assure);
    }
}

#[test]
fn attachments_follow_the_statement() {
    let statements = stored_statements();
    let child = &statements[1];

    let form = IncomeStatementForm::from_income_statement(child);

    assert_eq!(form.attachments, child.attachments);
    assert_eq!(form.other_info, "orphan's pension");
}
