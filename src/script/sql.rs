//! `SqlScriptWriter` - DDL fragments rendered with sea-query
//!
//! Tables, columns, indexes and foreign keys are built as sea-query schema
//! statements and rendered with the builder of the selected [`Dialect`].
//! Named primary/unique key constraints have no sea-query statement outside
//! `CREATE TABLE`, so their `ALTER TABLE` forms are written directly.
//!
//! Shapes a dialect cannot express are rejected up front with
//! [`CompareError::Unsupported`]; sea-query panics on several of them.

use super::{Dialect, ScriptWriter};
use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::schema::{Column, ForeignKey, Index, IndexedColumnOrder, KeyConstraint, Table};
use sea_query::{
    Alias, ColumnDef, Expr, ForeignKeyAction, ForeignKeyCreateStatement, IndexCreateStatement,
    IndexOrder, IntoIden, IndexType, MysqlQueryBuilder, PostgresQueryBuilder, SchemaBuilder,
    SqliteQueryBuilder, TableRef,
};

const IDENTITY_CLAUSE: &str = "GENERATED BY DEFAULT AS IDENTITY";

/// [`ScriptWriter`] producing SQL statements terminated with `;`
///
/// # Example
///
/// ```
/// use schemaguard::schema::{Index, IndexedColumn, Table};
/// use schemaguard::script::{Dialect, ScriptWriter, SqlScriptWriter};
///
/// let writer = SqlScriptWriter::new(Dialect::Postgres);
/// let table = Table::new("Orders").with_owner("dbo");
/// let index = Index::new("IX_Orders_CustomerId").column(IndexedColumn::new("CustomerId").asc());
///
/// let sql = writer.add_index(&table, &index).unwrap();
/// assert_eq!(sql, r#"CREATE INDEX "IX_Orders_CustomerId" ON "dbo"."Orders" ("CustomerId" ASC);"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlScriptWriter {
    dialect: Dialect,
    guard_statements: bool,
}

impl SqlScriptWriter {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            guard_statements: false,
        }
    }

    pub fn from_config(config: &CompareConfig) -> Self {
        Self {
            dialect: config.dialect,
            guard_statements: config.guard_statements,
        }
    }

    /// Emit `IF EXISTS` / `IF NOT EXISTS` where the dialect supports them
    #[must_use]
    pub fn with_guards(mut self, guard_statements: bool) -> Self {
        self.guard_statements = guard_statements;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn builder(&self) -> &'static dyn SchemaBuilder {
        match self.dialect {
            Dialect::Postgres => &PostgresQueryBuilder,
            Dialect::MySql => &MysqlQueryBuilder,
            Dialect::Sqlite => &SqliteQueryBuilder,
        }
    }

    fn unsupported(&self, object: String, reason: &str) -> CompareError {
        CompareError::unsupported(self.dialect, object, reason)
    }

    /// Only PostgreSQL qualifies tables with their owner
    fn table_ref(&self, name: &str, owner: Option<&str>) -> TableRef {
        match (self.dialect, owner) {
            (Dialect::Postgres, Some(owner)) => {
                TableRef::SchemaTable(Alias::new(owner).into_iden(), Alias::new(name).into_iden())
            }
            _ => TableRef::Table(Alias::new(name).into_iden()),
        }
    }

    fn owning_table(&self, table: &Table) -> TableRef {
        self.table_ref(table.name(), table.schema_owner())
    }

    fn quote(&self, identifier: &str) -> String {
        match self.dialect {
            Dialect::MySql => format!("`{}`", identifier.replace('`', "``")),
            Dialect::Postgres | Dialect::Sqlite => format!("\"{}\"", identifier.replace('"', "\"\"")),
        }
    }

    fn quoted_table(&self, table: &Table) -> String {
        match (self.dialect, table.schema_owner()) {
            (Dialect::Postgres, Some(owner)) => {
                format!("{}.{}", self.quote(owner), self.quote(table.name()))
            }
            _ => self.quote(table.name()),
        }
    }

    fn quoted_list(&self, names: &[String]) -> String {
        names
            .iter()
            .map(|name| self.quote(name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn column_def(&self, column: &Column, for_alter: bool) -> ColumnDef {
        let mut def = ColumnDef::new(Alias::new(column.name()));
        def.custom(Alias::new(column.full_data_type()));
        if !column.is_nullable() {
            def.not_null();
        } else if for_alter {
            def.null();
        }
        if let Some(default) = column.default_value() {
            def.default(Expr::cust(default));
        }
        if column.is_auto_number() {
            match self.dialect {
                // Identity changes on an existing column are separate subcommands
                Dialect::Postgres if for_alter => {}
                Dialect::Postgres => {
                    def.extra(IDENTITY_CLAUSE);
                }
                Dialect::MySql => {
                    def.auto_increment();
                }
                // INTEGER PRIMARY KEY columns are rowid aliases
                Dialect::Sqlite => {}
            }
        }
        def
    }

    fn key_index(&self, key: &KeyConstraint) -> IndexCreateStatement {
        let mut index = IndexCreateStatement::new();
        index.name(key.name());
        for column in key.columns() {
            index.col(Alias::new(column.as_str()));
        }
        index
    }

    fn foreign_key_statement(
        &self,
        table: &Table,
        key: &ForeignKey,
    ) -> Result<ForeignKeyCreateStatement, CompareError> {
        let mut statement = ForeignKeyCreateStatement::new();
        statement
            .name(key.name())
            .from_tbl(self.owning_table(table))
            .to_tbl(self.table_ref(key.referenced_table(), key.referenced_owner()));
        for column in key.columns() {
            statement.from_col(Alias::new(column.as_str()));
        }
        for column in key.referenced_columns() {
            statement.to_col(Alias::new(column.as_str()));
        }
        if let Some(rule) = key.delete_rule() {
            statement.on_delete(self.referential_action(table, key, rule)?);
        }
        if let Some(rule) = key.update_rule() {
            statement.on_update(self.referential_action(table, key, rule)?);
        }
        Ok(statement)
    }

    fn referential_action(
        &self,
        table: &Table,
        key: &ForeignKey,
        rule: &str,
    ) -> Result<ForeignKeyAction, CompareError> {
        match rule.trim().to_ascii_uppercase().replace('_', " ").as_str() {
            "CASCADE" => Ok(ForeignKeyAction::Cascade),
            "RESTRICT" => Ok(ForeignKeyAction::Restrict),
            "SET NULL" => Ok(ForeignKeyAction::SetNull),
            "SET DEFAULT" => Ok(ForeignKeyAction::SetDefault),
            "NO ACTION" => Ok(ForeignKeyAction::NoAction),
            _ => Err(self.unsupported(
                format!("foreign key {} on {}", key.name(), table),
                &format!("unknown referential action '{rule}'"),
            )),
        }
    }

    fn check_index_shape(&self, table: &Table, index: &Index) -> Result<(), CompareError> {
        let object = || format!("index {} on {}", index.name(), table);
        if !index.included_columns().is_empty() && self.dialect != Dialect::Postgres {
            return Err(self.unsupported(object(), "included columns are not supported"));
        }
        if index.fill_factor().unwrap_or(0) != 0 && self.dialect != Dialect::Postgres {
            return Err(self.unsupported(object(), "fill factor is not supported"));
        }
        if index.filter().is_some() && self.dialect == Dialect::MySql {
            return Err(self.unsupported(object(), "filtered indexes are not supported"));
        }
        Ok(())
    }

    fn index_type(&self, index: &Index) -> Option<IndexType> {
        if self.dialect == Dialect::Sqlite {
            return None;
        }
        match index.index_type().map(str::to_ascii_uppercase).as_deref() {
            Some("BTREE") => Some(IndexType::BTree),
            Some("HASH") => Some(IndexType::Hash),
            _ => None,
        }
    }

    fn index_statement(&self, table: &Table, index: &Index) -> IndexCreateStatement {
        let mut statement = IndexCreateStatement::new();
        statement.name(index.name()).table(self.owning_table(table));
        if index.is_unique() {
            statement.unique();
        }
        if let Some(index_type) = self.index_type(index) {
            statement.index_type(index_type);
        }
        for column in index.ordered_columns() {
            let name = Alias::new(column.name());
            match column.order() {
                Some(IndexedColumnOrder::Asc) => statement.col((name, IndexOrder::Asc)),
                Some(IndexedColumnOrder::Desc) => statement.col((name, IndexOrder::Desc)),
                None => statement.col(name),
            };
        }
        if self.dialect == Dialect::Postgres {
            for included in index.included_columns() {
                statement.include(Alias::new(included.name()));
            }
        }
        statement
    }

    fn terminate(&self, mut sql: String) -> String {
        sql.push(';');
        sql
    }
}

impl ScriptWriter for SqlScriptWriter {
    fn create_table(&self, table: &Table) -> Result<String, CompareError> {
        let mut statement = sea_query::Table::create();
        statement.table(self.owning_table(table));
        if self.guard_statements {
            statement.if_not_exists();
        }
        for column in table.columns() {
            statement.col(self.column_def(column, false));
        }
        if let Some(primary_key) = table.primary_key() {
            statement.primary_key(&mut self.key_index(primary_key));
        }
        for unique_key in table.unique_keys() {
            statement.index(self.key_index(unique_key).unique());
        }
        for foreign_key in table.foreign_keys() {
            statement.foreign_key(&mut self.foreign_key_statement(table, foreign_key)?);
        }
        Ok(self.terminate(statement.build_any(self.builder())))
    }

    fn drop_table(&self, table: &Table) -> Result<String, CompareError> {
        let mut statement = sea_query::Table::drop();
        statement.table(self.owning_table(table));
        if self.guard_statements {
            statement.if_exists();
        }
        Ok(self.terminate(statement.build_any(self.builder())))
    }

    fn add_column(&self, table: &Table, column: &Column) -> Result<String, CompareError> {
        let mut statement = sea_query::Table::alter();
        statement.table(self.owning_table(table));
        if self.guard_statements && self.dialect == Dialect::Postgres {
            statement.add_column_if_not_exists(self.column_def(column, false));
        } else {
            statement.add_column(self.column_def(column, false));
        }
        Ok(self.terminate(statement.build_any(self.builder())))
    }

    fn drop_column(&self, table: &Table, column: &Column) -> Result<String, CompareError> {
        let mut statement = sea_query::Table::alter();
        statement
            .table(self.owning_table(table))
            .drop_column(Alias::new(column.name()));
        Ok(self.terminate(statement.build_any(self.builder())))
    }

    fn alter_column(&self, table: &Table, from: &Column, to: &Column) -> Result<String, CompareError> {
        if self.dialect == Dialect::Sqlite {
            return Err(self.unsupported(
                format!("column {} on {}", to.name(), table),
                "columns cannot be modified in place",
            ));
        }
        let mut statement = sea_query::Table::alter();
        statement
            .table(self.owning_table(table))
            .modify_column(self.column_def(to, true));
        let mut sql = statement.build_any(self.builder());

        // MODIFY COLUMN restates the whole column; ALTER COLUMN only touches what it names
        if self.dialect == Dialect::Postgres {
            let column = self.quote(to.name());
            if from.default_value().is_some() && to.default_value().is_none() {
                sql.push_str(&format!(", ALTER COLUMN {column} DROP DEFAULT"));
            }
            match (from.is_auto_number(), to.is_auto_number()) {
                (false, true) => sql.push_str(&format!(", ALTER COLUMN {column} ADD {IDENTITY_CLAUSE}")),
                (true, false) => sql.push_str(&format!(", ALTER COLUMN {column} DROP IDENTITY")),
                _ => {}
            }
        }
        Ok(self.terminate(sql))
    }

    fn add_primary_key(&self, table: &Table, key: &KeyConstraint) -> Result<String, CompareError> {
        if self.dialect == Dialect::Sqlite {
            return Err(self.unsupported(
                format!("primary key {} on {}", key.name(), table),
                "constraints cannot be added to an existing table",
            ));
        }
        Ok(format!(
            "ALTER TABLE {} ADD CONSTRAINT {} PRIMARY KEY ({});",
            self.quoted_table(table),
            self.quote(key.name()),
            self.quoted_list(key.columns())
        ))
    }

    fn drop_primary_key(&self, table: &Table, key: &KeyConstraint) -> Result<String, CompareError> {
        match self.dialect {
            Dialect::Sqlite => Err(self.unsupported(
                format!("primary key {} on {}", key.name(), table),
                "constraints cannot be dropped from an existing table",
            )),
            Dialect::MySql => Ok(format!("ALTER TABLE {} DROP PRIMARY KEY;", self.quoted_table(table))),
            Dialect::Postgres => Ok(self.drop_constraint(table, key.name())),
        }
    }

    fn add_unique_key(&self, table: &Table, key: &KeyConstraint) -> Result<String, CompareError> {
        if self.dialect == Dialect::Sqlite {
            return Err(self.unsupported(
                format!("unique key {} on {}", key.name(), table),
                "constraints cannot be added to an existing table",
            ));
        }
        Ok(format!(
            "ALTER TABLE {} ADD CONSTRAINT {} UNIQUE ({});",
            self.quoted_table(table),
            self.quote(key.name()),
            self.quoted_list(key.columns())
        ))
    }

    fn drop_unique_key(&self, table: &Table, key: &KeyConstraint) -> Result<String, CompareError> {
        match self.dialect {
            Dialect::Sqlite => Err(self.unsupported(
                format!("unique key {} on {}", key.name(), table),
                "constraints cannot be dropped from an existing table",
            )),
            Dialect::MySql => Ok(format!(
                "ALTER TABLE {} DROP INDEX {};",
                self.quoted_table(table),
                self.quote(key.name())
            )),
            Dialect::Postgres => Ok(self.drop_constraint(table, key.name())),
        }
    }

    fn add_foreign_key(&self, table: &Table, key: &ForeignKey) -> Result<String, CompareError> {
        if self.dialect == Dialect::Sqlite {
            return Err(self.unsupported(
                format!("foreign key {} on {}", key.name(), table),
                "foreign keys cannot be added to an existing table",
            ));
        }
        let statement = self.foreign_key_statement(table, key)?;
        Ok(self.terminate(statement.build_any(self.builder())))
    }

    fn drop_foreign_key(&self, table: &Table, key: &ForeignKey) -> Result<String, CompareError> {
        if self.dialect == Dialect::Sqlite {
            return Err(self.unsupported(
                format!("foreign key {} on {}", key.name(), table),
                "foreign keys cannot be dropped from an existing table",
            ));
        }
        let mut statement = sea_query::ForeignKey::drop();
        statement.name(key.name()).table(self.owning_table(table));
        Ok(self.terminate(statement.build_any(self.builder())))
    }

    fn add_index(&self, table: &Table, index: &Index) -> Result<String, CompareError> {
        self.check_index_shape(table, index)?;

        let mut statement = self.index_statement(table, index);
        if self.guard_statements {
            statement.if_not_exists();
        }
        let mut sql = statement.build_any(self.builder());
        if let Some(fill_factor) = index.fill_factor().filter(|f| *f != 0) {
            sql.push_str(&format!(" WITH (fillfactor = {fill_factor})"));
        }
        if let Some(filter) = index.filter() {
            sql.push_str(" WHERE ");
            sql.push_str(filter);
        }
        Ok(self.terminate(sql))
    }

    fn drop_index(&self, table: &Table, index: &Index) -> Result<String, CompareError> {
        let mut statement = sea_query::Index::drop();
        statement.name(index.name()).table(self.owning_table(table));
        // MySQL has no IF EXISTS for DROP INDEX
        if self.guard_statements && self.dialect != Dialect::MySql {
            statement.if_exists();
        }
        Ok(self.terminate(statement.build_any(self.builder())))
    }
}

impl SqlScriptWriter {
    fn drop_constraint(&self, table: &Table, name: &str) -> String {
        let guard = if self.guard_statements { "IF EXISTS " } else { "" };
        format!(
            "ALTER TABLE {} DROP CONSTRAINT {}{};",
            self.quoted_table(table),
            guard,
            self.quote(name)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{IncludedColumn, IndexOptions, IndexedColumn, SqlServerIndexOptions};

    fn orders() -> Table {
        Table::new("Orders")
            .with_owner("dbo")
            .with_column(Column::new("Id", "int").not_null().mark_auto_number())
            .with_column(Column::new("CustomerId", "int").not_null())
            .with_column(Column::new("Notes", "text"))
            .with_primary_key(KeyConstraint::new("PK_Orders", ["Id"]))
    }

    fn customer_index() -> Index {
        Index::new("IX_Orders_CustomerId").column(IndexedColumn::new("CustomerId").asc())
    }

    // ============================================================================
    // Indexes
    // ============================================================================

    #[test]
    fn test_postgres_add_index_is_schema_qualified() {
        let writer = SqlScriptWriter::new(Dialect::Postgres);
        assert_eq!(
            writer.add_index(&orders(), &customer_index()).unwrap(),
            r#"CREATE INDEX "IX_Orders_CustomerId" ON "dbo"."Orders" ("CustomerId" ASC);"#
        );
    }

    #[test]
    fn test_postgres_add_index_with_include_fill_factor_and_filter() {
        let writer = SqlScriptWriter::new(Dialect::Postgres);
        let index = Index::new("IX_Orders_Open")
            .unique()
            .column(IndexedColumn::new("CustomerId").with_ordinal(1).desc())
            .with_filter("\"Notes\" IS NULL")
            .with_options(IndexOptions::SqlServer(
                SqlServerIndexOptions::new()
                    .include(IncludedColumn::new("Notes"))
                    .with_fill_factor(80),
            ));
        assert_eq!(
            writer.add_index(&orders(), &index).unwrap(),
            r#"CREATE UNIQUE INDEX "IX_Orders_Open" ON "dbo"."Orders" ("CustomerId" DESC) INCLUDE ("Notes") WITH (fillfactor = 80) WHERE "Notes" IS NULL;"#
        );
    }

    #[test]
    fn test_drop_index_per_dialect() {
        let index = customer_index();
        assert_eq!(
            SqlScriptWriter::new(Dialect::Postgres).drop_index(&orders(), &index).unwrap(),
            r#"DROP INDEX "dbo"."IX_Orders_CustomerId";"#
        );
        assert_eq!(
            SqlScriptWriter::new(Dialect::MySql).drop_index(&orders(), &index).unwrap(),
            "DROP INDEX `IX_Orders_CustomerId` ON `Orders`;"
        );
        assert_eq!(
            SqlScriptWriter::new(Dialect::Sqlite)
                .with_guards(true)
                .drop_index(&orders(), &index)
                .unwrap(),
            r#"DROP INDEX IF EXISTS "IX_Orders_CustomerId";"#
        );
    }

    #[test]
    fn test_mysql_drop_index_ignores_guard() {
        let writer = SqlScriptWriter::new(Dialect::MySql).with_guards(true);
        assert_eq!(
            writer.drop_index(&orders(), &customer_index()).unwrap(),
            "DROP INDEX `IX_Orders_CustomerId` ON `Orders`;"
        );
    }

    #[test]
    fn test_mysql_rejects_filtered_index() {
        let writer = SqlScriptWriter::new(Dialect::MySql);
        let index = customer_index().with_filter("Notes IS NULL");
        let err = writer.add_index(&orders(), &index).unwrap_err();
        assert!(matches!(err, CompareError::Unsupported { .. }));
        assert_eq!(
            err.to_string(),
            "MySQL cannot render index IX_Orders_CustomerId on dbo.Orders: filtered indexes are not supported"
        );
    }

    #[test]
    fn test_sqlite_rejects_fill_factor() {
        let writer = SqlScriptWriter::new(Dialect::Sqlite);
        let index = customer_index()
            .with_options(IndexOptions::SqlServer(SqlServerIndexOptions::new().with_fill_factor(90)));
        assert!(matches!(
            writer.add_index(&orders(), &index),
            Err(CompareError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_sqlite_allows_zero_fill_factor_and_filter() {
        let writer = SqlScriptWriter::new(Dialect::Sqlite);
        let index = customer_index()
            .with_filter("Notes IS NULL")
            .with_options(IndexOptions::SqlServer(SqlServerIndexOptions::new()));
        assert_eq!(
            writer.add_index(&orders(), &index).unwrap(),
            r#"CREATE INDEX "IX_Orders_CustomerId" ON "Orders" ("CustomerId" ASC) WHERE Notes IS NULL;"#
        );
    }

    // ============================================================================
    // Tables and columns
    // ============================================================================

    #[test]
    fn test_postgres_create_table() {
        let writer = SqlScriptWriter::new(Dialect::Postgres);
        assert_eq!(
            writer.create_table(&orders()).unwrap(),
            r#"CREATE TABLE "dbo"."Orders" ( "Id" int NOT NULL GENERATED BY DEFAULT AS IDENTITY, "CustomerId" int NOT NULL, "Notes" text, CONSTRAINT "PK_Orders" PRIMARY KEY ("Id") );"#
        );
    }

    #[test]
    fn test_drop_table_with_guard() {
        let writer = SqlScriptWriter::new(Dialect::Postgres).with_guards(true);
        assert_eq!(writer.drop_table(&orders()).unwrap(), r#"DROP TABLE IF EXISTS "dbo"."Orders";"#);
    }

    #[test]
    fn test_add_column_with_default() {
        let writer = SqlScriptWriter::new(Dialect::MySql);
        let column = Column::new("Status", "varchar").with_length(20).not_null().with_default("'new'");
        assert_eq!(
            writer.add_column(&orders(), &column).unwrap(),
            "ALTER TABLE `Orders` ADD COLUMN `Status` varchar(20) NOT NULL DEFAULT 'new';"
        );
    }

    #[test]
    fn test_drop_column() {
        let writer = SqlScriptWriter::new(Dialect::Postgres);
        assert_eq!(
            writer.drop_column(&orders(), &Column::new("Notes", "text")).unwrap(),
            r#"ALTER TABLE "dbo"."Orders" DROP COLUMN "Notes";"#
        );
    }

    #[test]
    fn test_postgres_alter_column() {
        let writer = SqlScriptWriter::new(Dialect::Postgres);
        let column = Column::new("Notes", "varchar").with_length(500);
        assert_eq!(
            writer.alter_column(&orders(), &Column::new("Notes", "text"), &column).unwrap(),
            r#"ALTER TABLE "dbo"."Orders" ALTER COLUMN "Notes" TYPE varchar(500), ALTER COLUMN "Notes" DROP NOT NULL;"#
        );
    }

    #[test]
    fn test_postgres_alter_column_drops_removed_default() {
        let writer = SqlScriptWriter::new(Dialect::Postgres);
        let from = Column::new("Status", "varchar").with_length(20).with_default("'new'");
        let to = Column::new("Status", "varchar").with_length(20);
        assert_eq!(
            writer.alter_column(&orders(), &from, &to).unwrap(),
            r#"ALTER TABLE "dbo"."Orders" ALTER COLUMN "Status" TYPE varchar(20), ALTER COLUMN "Status" DROP NOT NULL, ALTER COLUMN "Status" DROP DEFAULT;"#
        );
    }

    #[test]
    fn test_postgres_alter_column_sets_changed_default() {
        let writer = SqlScriptWriter::new(Dialect::Postgres);
        let from = Column::new("Status", "varchar").with_length(20).with_default("'new'");
        let to = Column::new("Status", "varchar").with_length(20).with_default("'open'");
        assert_eq!(
            writer.alter_column(&orders(), &from, &to).unwrap(),
            r#"ALTER TABLE "dbo"."Orders" ALTER COLUMN "Status" TYPE varchar(20), ALTER COLUMN "Status" DROP NOT NULL, ALTER COLUMN "Status" SET DEFAULT 'open';"#
        );
    }

    #[test]
    fn test_postgres_alter_column_toggles_identity() {
        let writer = SqlScriptWriter::new(Dialect::Postgres);
        let plain = Column::new("Id", "int").not_null();
        let identity = Column::new("Id", "int").not_null().mark_auto_number();
        assert_eq!(
            writer.alter_column(&orders(), &plain, &identity).unwrap(),
            r#"ALTER TABLE "dbo"."Orders" ALTER COLUMN "Id" TYPE int, ALTER COLUMN "Id" SET NOT NULL, ALTER COLUMN "Id" ADD GENERATED BY DEFAULT AS IDENTITY;"#
        );
        assert_eq!(
            writer.alter_column(&orders(), &identity, &plain).unwrap(),
            r#"ALTER TABLE "dbo"."Orders" ALTER COLUMN "Id" TYPE int, ALTER COLUMN "Id" SET NOT NULL, ALTER COLUMN "Id" DROP IDENTITY;"#
        );
    }

    #[test]
    fn test_postgres_alter_keeps_existing_identity_untouched() {
        let writer = SqlScriptWriter::new(Dialect::Postgres);
        let from = Column::new("Id", "int").not_null().mark_auto_number();
        let to = Column::new("Id", "bigint").not_null().mark_auto_number();
        assert_eq!(
            writer.alter_column(&orders(), &from, &to).unwrap(),
            r#"ALTER TABLE "dbo"."Orders" ALTER COLUMN "Id" TYPE bigint, ALTER COLUMN "Id" SET NOT NULL;"#
        );
    }

    #[test]
    fn test_mysql_alter_column_keeps_auto_increment() {
        let writer = SqlScriptWriter::new(Dialect::MySql);
        let from = Column::new("Id", "int").not_null().mark_auto_number();
        let to = Column::new("Id", "bigint").not_null().mark_auto_number();
        assert_eq!(
            writer.alter_column(&orders(), &from, &to).unwrap(),
            "ALTER TABLE `Orders` MODIFY COLUMN `Id` bigint NOT NULL AUTO_INCREMENT;"
        );
    }

    #[test]
    fn test_mysql_alter_column_restates_without_removed_default() {
        let writer = SqlScriptWriter::new(Dialect::MySql);
        let from = Column::new("Status", "varchar").with_length(20).with_default("'new'");
        let to = Column::new("Status", "varchar").with_length(20);
        assert_eq!(
            writer.alter_column(&orders(), &from, &to).unwrap(),
            "ALTER TABLE `Orders` MODIFY COLUMN `Status` varchar(20) NULL;"
        );
    }

    #[test]
    fn test_sqlite_rejects_alter_column() {
        let writer = SqlScriptWriter::new(Dialect::Sqlite);
        let notes = Column::new("Notes", "text");
        let err = writer.alter_column(&orders(), &notes, &notes).unwrap_err();
        assert_eq!(
            err.to_string(),
            "SQLite cannot render column Notes on dbo.Orders: columns cannot be modified in place"
        );
    }

    // ============================================================================
    // Keys
    // ============================================================================

    #[test]
    fn test_key_constraints_postgres() {
        let writer = SqlScriptWriter::new(Dialect::Postgres);
        let uq = KeyConstraint::new("UQ_Orders_Ref", ["CustomerId", "Id"]);
        assert_eq!(
            writer.add_unique_key(&orders(), &uq).unwrap(),
            r#"ALTER TABLE "dbo"."Orders" ADD CONSTRAINT "UQ_Orders_Ref" UNIQUE ("CustomerId", "Id");"#
        );
        assert_eq!(
            writer.with_guards(true).drop_unique_key(&orders(), &uq).unwrap(),
            r#"ALTER TABLE "dbo"."Orders" DROP CONSTRAINT IF EXISTS "UQ_Orders_Ref";"#
        );
    }

    #[test]
    fn test_key_constraints_mysql() {
        let writer = SqlScriptWriter::new(Dialect::MySql);
        let pk = KeyConstraint::new("PK_Orders", ["Id"]);
        assert_eq!(
            writer.add_primary_key(&orders(), &pk).unwrap(),
            "ALTER TABLE `Orders` ADD CONSTRAINT `PK_Orders` PRIMARY KEY (`Id`);"
        );
        assert_eq!(writer.drop_primary_key(&orders(), &pk).unwrap(), "ALTER TABLE `Orders` DROP PRIMARY KEY;");
        let uq = KeyConstraint::new("UQ_Orders_Ref", ["CustomerId"]);
        assert_eq!(
            writer.drop_unique_key(&orders(), &uq).unwrap(),
            "ALTER TABLE `Orders` DROP INDEX `UQ_Orders_Ref`;"
        );
    }

    #[test]
    fn test_sqlite_rejects_constraint_changes() {
        let writer = SqlScriptWriter::new(Dialect::Sqlite);
        let pk = KeyConstraint::new("PK_Orders", ["Id"]);
        let fk = ForeignKey::new("FK_Orders_Customers", ["CustomerId"], "Customers").references(["Id"]);
        assert!(writer.add_primary_key(&orders(), &pk).is_err());
        assert!(writer.drop_unique_key(&orders(), &pk).is_err());
        assert!(writer.add_foreign_key(&orders(), &fk).is_err());
        assert!(writer.drop_foreign_key(&orders(), &fk).is_err());
    }

    #[test]
    fn test_quote_escapes_embedded_quotes() {
        let writer = SqlScriptWriter::new(Dialect::Postgres);
        assert_eq!(writer.quote("odd\"name"), "\"odd\"\"name\"");
        assert_eq!(SqlScriptWriter::new(Dialect::MySql).quote("odd`name"), "`odd``name`");
    }

    #[test]
    fn test_foreign_key_add_and_drop() {
        let writer = SqlScriptWriter::new(Dialect::Postgres);
        let fk = ForeignKey::new("FK_Orders_Customers", ["CustomerId"], "Customers")
            .with_referenced_owner("dbo")
            .references(["Id"])
            .on_delete("cascade");
        assert_eq!(
            writer.add_foreign_key(&orders(), &fk).unwrap(),
            r#"ALTER TABLE "dbo"."Orders" ADD CONSTRAINT "FK_Orders_Customers" FOREIGN KEY ("CustomerId") REFERENCES "dbo"."Customers" ("Id") ON DELETE CASCADE;"#
        );
        assert_eq!(
            writer.drop_foreign_key(&orders(), &fk).unwrap(),
            r#"ALTER TABLE "dbo"."Orders" DROP CONSTRAINT "FK_Orders_Customers";"#
        );
    }

    #[test]
    fn test_unknown_referential_action_is_unsupported() {
        let writer = SqlScriptWriter::new(Dialect::MySql);
        let fk = ForeignKey::new("FK_Orders_Customers", ["CustomerId"], "Customers")
            .references(["Id"])
            .on_update("EXPLODE");
        assert!(matches!(
            writer.add_foreign_key(&orders(), &fk),
            Err(CompareError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_from_config_copies_dialect_and_guards() {
        let config = CompareConfig {
            dialect: Dialect::Sqlite,
            guard_statements: true,
            ..CompareConfig::default()
        };
        let writer = SqlScriptWriter::from_config(&config);
        assert_eq!(writer.dialect(), Dialect::Sqlite);
        assert_eq!(writer.drop_table(&orders()).unwrap(), r#"DROP TABLE IF EXISTS "Orders";"#);
    }
}
