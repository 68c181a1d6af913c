//! Statement templates
//!
//! A template is SQL text with `${item:type}` or `${item:type:config}`
//! tokens. Parsing resolves every token into a [`Parameter`] (positions
//! `1..=n` in order of appearance) and rewrites it to the dialect's
//! placeholder:
//!
//! ```text
//! INSERT INTO logs (host, ts, msg) VALUES (${header.host:string}, ${header.ts:date:%s}, ${body:string})
//! -> INSERT INTO logs (host, ts, msg) VALUES ($1, $2, $3)
//! ```
//!
//! The token body is split on its first two `:`, so a config may itself
//! contain `:`. `$${` writes a literal `${`.

use tracing::debug;

use crate::dialect::SqlDialect;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::parameter::Parameter;
use crate::registry::ExtractorRegistry;
use crate::statement::{ParameterBuffer, PreparedStatement, StatementBinder};

/// A parsed statement template
#[derive(Debug)]
pub struct StatementTemplate {
    sql: String,
    parameters: Vec<Parameter>,
}

impl StatementTemplate {
    /// Parse `template`, resolving each token against `registry`
    pub fn parse(
        template: &str,
        dialect: &dyn SqlDialect,
        registry: &ExtractorRegistry,
    ) -> Result<Self> {
        let mut sql = String::with_capacity(template.len());
        let mut parameters = Vec::new();
        let mut rest = template;

        while let Some(idx) = rest.find('$') {
            sql.push_str(&rest[..idx]);
            let tail = &rest[idx..];

            if let Some(after) = tail.strip_prefix("$${") {
                sql.push_str("${");
                rest = after;
                continue;
            }

            let Some(after) = tail.strip_prefix("${") else {
                sql.push('$');
                rest = &tail[1..];
                continue;
            };

            let offset = template.len() - tail.len();
            let end = after.find('}').ok_or_else(|| {
                Error::config(format!("unterminated placeholder at offset {}", offset))
            })?;
            let (item, type_name, config) = split_token(&after[..end], offset)?;

            let position = parameters.len() + 1;
            parameters.push(Parameter::new(position, item, type_name, config, registry)?);
            sql.push_str(&dialect.placeholder(position));
            rest = &after[end + 1..];
        }
        sql.push_str(rest);

        debug!(
            dialect = dialect.name(),
            parameters = parameters.len(),
            "Parsed statement template"
        );
        Ok(Self { sql, parameters })
    }

    /// SQL text with tokens replaced by dialect placeholders
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters in position order
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Number of placeholders
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the template has no placeholders
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Bind every parameter, in position order, from one event
    pub fn bind(&self, statement: &mut dyn StatementBinder, event: &Event) -> Result<()> {
        for parameter in &self.parameters {
            parameter.bind(statement, event)?;
        }
        Ok(())
    }

    /// Bind one event into a fresh buffer sized to this template
    pub fn values(&self, event: &Event) -> Result<ParameterBuffer> {
        let mut buffer = ParameterBuffer::with_capacity(self.parameters.len());
        self.bind(&mut buffer, event)?;
        Ok(buffer)
    }

    /// Bind one event and execute `statement` with the bound values
    pub async fn execute(&self, statement: &dyn PreparedStatement, event: &Event) -> Result<u64> {
        let buffer = self.values(event)?;
        statement.execute(buffer.values()).await
    }
}

fn split_token(token: &str, offset: usize) -> Result<(&str, &str, Option<&str>)> {
    if token.trim().is_empty() {
        return Err(Error::config(format!("empty placeholder at offset {}", offset)));
    }

    let mut parts = token.splitn(3, ':');
    let item = parts.next().unwrap_or_default().trim();
    let type_name = parts.next().map(str::trim).ok_or_else(|| {
        Error::config(format!(
            "placeholder '{}' at offset {} has no type, expected ${{item:type}}",
            token, offset
        ))
    })?;
    let config = parts.next().filter(|c| !c.is_empty());

    Ok((item, type_name, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySqlDialect, PostgresDialect};

    fn parse(template: &str) -> Result<StatementTemplate> {
        StatementTemplate::parse(template, &PostgresDialect, &ExtractorRegistry::new())
    }

    #[test]
    fn test_split_token() {
        assert_eq!(split_token("body:string", 0).unwrap(), ("body", "string", None));
        assert_eq!(
            split_token("header.ts:date:%H:%M", 0).unwrap(),
            ("header.ts", "date", Some("%H:%M"))
        );
        assert_eq!(split_token("body:string:", 0).unwrap(), ("body", "string", None));
        assert!(split_token("body", 0).is_err());
        assert!(split_token("  ", 0).is_err());
    }

    #[test]
    fn test_no_placeholders() {
        let t = parse("DELETE FROM t WHERE price > $5").unwrap();
        assert!(t.is_empty());
        assert_eq!(t.sql(), "DELETE FROM t WHERE price > $5");
    }

    #[test]
    fn test_escaped_placeholder() {
        let t = parse("SELECT '$${literal}', ${body:string}").unwrap();
        assert_eq!(t.sql(), "SELECT '${literal}', $1");
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_mysql_placeholders() {
        let t = StatementTemplate::parse(
            "INSERT INTO t VALUES (${body:string}, ${header.n:int})",
            &MySqlDialect,
            &ExtractorRegistry::new(),
        )
        .unwrap();
        assert_eq!(t.sql(), "INSERT INTO t VALUES (?, ?)");
    }

    #[test]
    fn test_unterminated() {
        let err = parse("INSERT INTO t VALUES (${body:string").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("offset 22"));
    }
}
