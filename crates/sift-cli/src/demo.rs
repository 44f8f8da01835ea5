//! The demo task list and the filter form declared over it.

use sift::{catalog, codec, Column, ColumnType, FilterEnum, FilterForm, Scalar};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Open,
    Doing,
    Done,
}

impl FilterEnum for Status {
    fn variants() -> &'static [Self] {
        &[Status::Open, Status::Doing, Status::Done]
    }

    fn name(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    pub id: i64,
    pub title: &'static str,
    pub status: Status,
    pub priority: i64,
    pub estimate: Option<f64>,
    pub assignee: Option<&'static str>,
    pub blocked: bool,
}

pub fn tasks() -> Vec<Task> {
    vec![
        task(1, "Fix login bug", Status::Open, 5, Some(2.0), Some("ana"), false),
        task(2, "Write release notes", Status::Doing, 2, Some(1.5), Some("bo"), false),
        task(3, "Upgrade 100% of deps", Status::Done, 3, None, None, false),
        task(4, "Bug bash", Status::Open, 4, Some(8.0), None, true),
        task(5, "Refactor parser", Status::Doing, 3, Some(5.0), Some("ana"), true),
        task(6, "Archive old tickets", Status::Done, 1, Some(0.5), Some("cy"), false),
    ]
}

fn task(
    id: i64,
    title: &'static str,
    status: Status,
    priority: i64,
    estimate: Option<f64>,
    assignee: Option<&'static str>,
    blocked: bool,
) -> Task {
    Task {
        id,
        title,
        status,
        priority,
        estimate,
        assignee,
        blocked,
    }
}

pub fn accessor(task: &Task, column: &str) -> Scalar {
    match column {
        "id" => Scalar::Integer(task.id),
        "title" => Scalar::Text(task.title.to_string()),
        "status" => task.status.stored(),
        "priority" => Scalar::Integer(task.priority),
        "estimate" => task.estimate.map_or(Scalar::Null, Scalar::Decimal),
        "assignee" => task
            .assignee
            .map_or(Scalar::Null, |a| Scalar::Text(a.to_string())),
        "blocked" => Scalar::Bool(task.blocked),
        _ => Scalar::Null,
    }
}

/// Field names and the keys each one reads, in form order.
pub const FIELDS: &[(&str, &str)] = &[
    ("id", "id[0], id[1], ..."),
    ("q", "q"),
    ("status", "status[0], status[1], ..."),
    ("priority", "priority.from, priority.to"),
    ("estimate", "estimate.from, estimate.to"),
    ("assignee", "assignee"),
    ("blocked", "blocked"),
    ("sort", "ignored"),
];

fn column<A>(name: &str, qualifier: Option<&str>) -> Column<A> {
    let column = Column::new(name);
    match qualifier {
        Some(q) => column.qualified(q),
        None => column,
    }
}

/// Builds the task search form.
pub fn form(qualifier: Option<&str>) -> FilterForm {
    FilterForm::new()
        .field(
            "id",
            column::<i64>("id", qualifier),
            catalog::one_of(codec::number::<i64>(), ColumnType::required()),
        )
        .field(
            "q",
            column::<String>("title", qualifier),
            catalog::text_contains(ColumnType::required()).optional(),
        )
        .field(
            "status",
            column::<Status>("status", qualifier),
            catalog::enum_one_of(ColumnType::enumeration()),
        )
        .field(
            "priority",
            column::<i64>("priority", qualifier),
            catalog::range(codec::number::<i64>(), ColumnType::required()),
        )
        .field(
            "estimate",
            column::<Option<f64>>("estimate", qualifier),
            catalog::range(codec::decimal(), ColumnType::nullable()),
        )
        .field(
            "assignee",
            column::<Option<String>>("assignee", qualifier),
            catalog::text_equals(ColumnType::nullable()).optional(),
        )
        .field(
            "blocked",
            column::<bool>("blocked", qualifier),
            catalog::boolean_equals(ColumnType::required()).optional(),
        )
        .field(
            "sort",
            column::<String>("sort", qualifier),
            catalog::ignored::<String, String>(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift::data;

    #[test]
    fn field_table_matches_form() {
        let names: Vec<_> = FIELDS.iter().map(|(name, _)| *name).collect();
        assert_eq!(form(None).names(), names);
    }

    #[test]
    fn empty_input_selects_every_task() {
        let bound = form(None).bind(&sift::Data::new()).unwrap();
        assert_eq!(bound.predicate.count(&tasks(), accessor).unwrap(), tasks().len());
        assert_eq!(bound.skipped, vec!["sort"]);
    }

    #[test]
    fn null_assignee_excluded() {
        let bound = form(None).bind(&data([("assignee", "ana")])).unwrap();
        let tasks = tasks();
        let hits = bound.predicate.filter(&tasks, accessor).unwrap();
        let ids: Vec<_> = hits.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }
}
