use super::{Comma, Formatter, ToSql};

use trellis_core::stmt::{Delete, Insert, OrderByExpr, Select, SelectItem, Statement, Update};

impl ToSql for &Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &Select {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = f.renderer.table_name(self.table);
        let alias = f.renderer.translator.ident(&self.alias);

        fmt!(f, "SELECT " Comma(&self.items) " FROM " table " AS " alias);

        for join in &self.joins {
            let registry = f.renderer.registry();
            let target = f.renderer.table_name(registry.assoc(join.assoc).to);
            let alias = f.renderer.translator.ident(&join.to_alias);
            let kw = if join.inner { " JOIN " } else { " LEFT JOIN " };
            let on = join.on_expr();

            fmt!(f, kw target " AS " alias " ON " on);
        }

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY " Comma(&self.order_by));
        }
    }
}

impl ToSql for &Insert {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = f.renderer.table_name(self.table);

        fmt!(f, "INSERT INTO " table " (");

        let mut s = "";
        for column in &self.columns {
            let name = f.renderer.column_name(*column);
            fmt!(f, s name);
            s = ", ";
        }

        fmt!(f, ") VALUES (" Comma(&self.values) ")");

        if let Some(key) = self.returning {
            let name = f.renderer.column_name(key);
            fmt!(f, " RETURNING " name);
        }
    }
}

impl ToSql for &Update {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = f.renderer.table_name(self.table);

        fmt!(f, "UPDATE " table " SET ");

        let mut s = "";
        for assignment in &self.assignments {
            let name = f.renderer.column_name(assignment.column);
            fmt!(f, s name " = " assignment.value);
            s = ", ";
        }

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }
    }
}

impl ToSql for &Delete {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = f.renderer.table_name(self.table);

        fmt!(f, "DELETE FROM " table);

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }
    }
}

impl ToSql for &SelectItem {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, &self.expr);

        if let Some(label) = &self.label {
            let label = f.renderer.translator.ident(label);
            fmt!(f, " AS " label);
        }
    }
}

impl ToSql for &OrderByExpr {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, &self.expr);

        if self.desc {
            fmt!(f, " DESC");
        }
    }
}
