//! SQL fragments restricting selects to visible records.

use crate::schema::EntitySchema;

/// FROM clause joining the container table on the record's `pid`.
///
/// The container table itself is selected without a join.
pub fn table_clause(schema: &EntitySchema) -> String {
    if schema.is_container() {
        return schema.name().to_string();
    }

    let container = &schema.container().table;
    format!(
        "{table} LEFT JOIN {container} ON {table}.pid = {container}.uid",
        table = schema.name(),
        container = container,
    )
}

/// ORDER BY clause giving pages a stable order.
pub fn order_clause(schema: &EntitySchema) -> String {
    format!("{}.uid", schema.name())
}

/// WHERE clause selecting only records that are visible and searchable.
pub fn where_clause(schema: &EntitySchema) -> String {
    let container = schema.container();
    let mut clause = String::from("1=1");

    push_enable_fields(
        &mut clause,
        schema.name(),
        schema.disabled_field(),
        schema.delete_field(),
    );
    if !schema.is_container() {
        push_enable_fields(
            &mut clause,
            &container.table,
            container.disabled_field.as_deref(),
            container.delete_field.as_deref(),
        );
    }
    clause.push_str(&format!(
        " AND {}.{} = 0",
        container.table, container.exclude_field
    ));

    if let Some(fragment) = schema.visibility().additional_where.as_deref() {
        let fragment = fragment.trim();
        let has_and = fragment
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("AND "));
        if has_and {
            clause.push(' ');
        } else {
            clause.push_str(" AND ");
        }
        clause.push_str(fragment);
    }

    let blacklist = &schema.visibility().root_line_blacklist;
    if !blacklist.is_empty() {
        let ids = blacklist
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        clause.push_str(&format!(
            " AND {table}.uid NOT IN ({ids}) AND {table}.pid NOT IN ({ids})",
            table = container.table,
            ids = ids,
        ));
    }

    clause
}

/// WHERE clause of a single record select.
pub fn single_where_clause(schema: &EntitySchema, identifier: i64) -> String {
    format!(
        "{} AND {}.uid = {}",
        where_clause(schema),
        schema.name(),
        identifier
    )
}

fn push_enable_fields(
    clause: &mut String,
    table: &str,
    disabled: Option<&str>,
    deleted: Option<&str>,
) {
    if let Some(field) = disabled {
        clause.push_str(&format!(" AND {}.{} = 0", table, field));
    }
    if let Some(field) = deleted {
        clause.push_str(&format!(" AND {}.{} = 0", table, field));
    }
}
