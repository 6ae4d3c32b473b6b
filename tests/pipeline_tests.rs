//! End-to-end scenarios against the public pipeline API.

use kruistabel::classify::Classifier;
use kruistabel::config::Config;
use kruistabel::lexicon::Lexicon;
use kruistabel::pipeline;
use kruistabel::segment::{segment, ParseCondition};

#[test]
fn scenario_single_task_and_statement() {
    let text = "B1-K1:\nVakkennis en vaardigheden\nheeft kennis van materialen\nComplexiteit\n";
    let lexicon = Lexicon::default();
    let out = segment(text, &lexicon);

    assert_eq!(out.tree.core_tasks.len(), 1);
    assert_eq!(out.tree.core_tasks[0].code, "B1-K1");
    let texts: Vec<_> = out
        .tree
        .statements_for("B1-K1")
        .iter()
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(texts, vec!["heeft kennis van materialen"]);
}

#[test]
fn scenario_statement_wraps_across_lines() {
    let text = "B1-K1:\nVakkennis en vaardigheden\nkan een plan\nopstellen voor het werk\nComplexiteit\n";
    let out = segment(text, &Lexicon::default());
    let texts: Vec<_> = out
        .tree
        .statements_for("B1-K1")
        .iter()
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(texts, vec!["kan een plan opstellen voor het werk"]);
}

#[test]
fn scenario_similarity_assignment() {
    let text = concat!(
        "B1-K1:\n",
        "Werkprocessen\n",
        "B1-K1-W1: Metselwerk\n",
        "metselen van een muur\n",
        "B1-K1-W2: Klantcontact\n",
        "rapporteren aan de klant\n",
        "Complexiteit\n",
        "Vakkennis en vaardigheden\n",
        "kan een muur metselen\n",
        "Resultaat\n",
    );
    let lexicon = Lexicon::default();
    let out = segment(text, &lexicon);
    let classification = Classifier::new(&lexicon).classify(&out.tree);

    let assignment = classification
        .assignment_for("B1-K1", "kan een muur metselen")
        .unwrap();
    assert_eq!(assignment.process, "B1-K1-W1");
    assert!(!assignment.fallback);
}

#[test]
fn scenario_empty_descriptions_use_flagged_fallback() {
    let text = concat!(
        "B1-K1:\n",
        "Werkprocessen\n",
        "B1-K1-W1\n",
        "B1-K1-W2\n",
        "Complexiteit\n",
        "Vakkennis en vaardigheden\n",
        "kan een muur metselen\n",
        "Resultaat\n",
    );
    let lexicon = Lexicon::default();
    let out = segment(text, &lexicon);
    let classification = Classifier::new(&lexicon).classify(&out.tree);

    // never left unassigned when at least one work process exists
    assert!(classification.unassigned.is_empty());
    let assignment = classification
        .assignment_for("B1-K1", "kan een muur metselen")
        .unwrap();
    assert!(assignment.fallback);
}

#[test]
fn scenario_no_structure_is_a_condition_not_an_error() {
    let out = segment("vrije tekst zonder codes\n", &Lexicon::default());
    assert!(out.tree.core_tasks.is_empty());
    assert_eq!(out.tree.condition(), ParseCondition::NoStructureFound);
}

#[test]
fn invariant_statement_lists_contain_no_duplicates() {
    let text = concat!(
        "B1-K1:\n",
        "Vakkennis en vaardigheden\n",
        "kan metselen\n",
        "kan metselen\n",
        "kan metselen Pagina 3 van 12\n",
        "Complexiteit\n",
    );
    let out = segment(text, &Lexicon::default());
    let stmts = out.tree.statements_for("B1-K1");
    assert_eq!(stmts.len(), 1);
}

#[test]
fn invariant_every_row_belongs_to_exactly_one_task() {
    let text = concat!(
        "Basisdeel\n",
        "B1-K1:\n",
        "Vakkennis en vaardigheden\n",
        "kan metselen\n",
        "Complexiteit\n",
        "B1-K2:\n",
        "Vakkennis en vaardigheden\n",
        "kent de normen\n",
        "Complexiteit\n",
    );
    let report = pipeline::run(text, &Config::default()).unwrap();
    let task_columns: Vec<usize> = ["B1-K1", "B1-K2"]
        .iter()
        .map(|c| report.matrix.column_index(c).unwrap())
        .collect();
    for row in &report.matrix.rows {
        let owners = task_columns
            .iter()
            .filter(|&&i| row.cells[i].set)
            .count();
        assert_eq!(owners, 1, "row {:?}", row.statement);
    }
}

#[test]
fn invariant_at_most_one_process_assignment_per_statement() {
    let text = concat!(
        "B1-K1:\n",
        "Werkprocessen\n",
        "B1-K1-W1: Metselwerk\n",
        "metselen van een muur\n",
        "B1-K1-W2: Klantcontact\n",
        "rapporteren aan de klant\n",
        "Complexiteit\n",
        "Vakkennis en vaardigheden\n",
        "kan een muur metselen\n",
        "heeft kennis van rapporteren\n",
        "weet hoe beton uithardt\n",
        "Resultaat\n",
    );
    let report = pipeline::run(text, &Config::default()).unwrap();
    let process_columns: Vec<usize> = ["B1-K1-W1", "B1-K1-W2"]
        .iter()
        .map(|c| report.matrix.column_index(c).unwrap())
        .collect();
    for row in &report.matrix.rows {
        let assigned = process_columns
            .iter()
            .filter(|&&i| row.cells[i].set)
            .count();
        assert!(assigned <= 1, "row {:?}", row.statement);
    }
}

#[test]
fn fallback_flags_surface_in_matrix_cells() {
    let text = concat!(
        "B1-K1:\n",
        "Werkprocessen\n",
        "B1-K1-W1\n",
        "Complexiteit\n",
        "Vakkennis en vaardigheden\n",
        "kan een muur metselen\n",
        "Resultaat\n",
    );
    let report = pipeline::run(text, &Config::default()).unwrap();
    let w1 = report.matrix.column_index("B1-K1-W1").unwrap();
    let row = &report.matrix.rows[0];
    assert!(row.cells[w1].set);
    assert!(row.cells[w1].via_fallback);
}

#[test]
fn decision_trace_mentions_every_statement() {
    let text = concat!(
        "B1-K1:\n",
        "Werkprocessen\n",
        "B1-K1-W1: Metselwerk\n",
        "metselen van een muur\n",
        "Complexiteit\n",
        "Vakkennis en vaardigheden\n",
        "kan een muur metselen\n",
        "kent de normen\n",
        "Resultaat\n",
    );
    let report = pipeline::run(text, &Config::default()).unwrap();
    let traced: Vec<&str> = report
        .classification
        .trace
        .iter()
        .map(|t| t.statement.as_str())
        .collect();
    assert!(traced.contains(&"kan een muur metselen"));
    assert!(traced.contains(&"kent de normen"));
}
