use tabsplit_application::{
    BillLoadError, BillParser, BillScript, BillStatement, BillStatementWithLine,
};
use tabsplit_domain::Money;
use tabsplit_parser::{ParseError, Statement as ParserStatement, parse_program};

#[derive(Default)]
pub struct TabsplitBillParser;

impl BillParser for TabsplitBillParser {
    fn parse<'a>(&self, content: &'a str) -> Result<BillScript<'a>, BillLoadError<'a>> {
        let program = parse_program(content).map_err(|err| match err {
            ParseError::SyntaxError { line, detail } => BillLoadError::SyntaxError { line, detail },
        })?;

        let statements = program
            .statements
            .into_iter()
            .map(|stmt| BillStatementWithLine {
                line: stmt.line,
                statement: match stmt.statement {
                    ParserStatement::Members(names) => BillStatement::Members(names),
                    ParserStatement::Item(item) => BillStatement::Item {
                        member: item.member,
                        amount: Money::from_decimal(item.amount),
                        description: item.description,
                    },
                    ParserStatement::Tax(text) => BillStatement::Tax(text),
                    ParserStatement::Tip(text) => BillStatement::Tip(text),
                    ParserStatement::Payers(names) => BillStatement::Payers(names),
                },
            })
            .collect();

        Ok(BillScript::new(statements))
    }
}
