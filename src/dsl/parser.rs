//! Parser for the netlist format.

use std::collections::HashSet;

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{NodalError, Result};

/// Parser for netlist text.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<NetlistAst> {
        let mut ast = NetlistAst::new();
        let mut names = HashSet::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            match self.current.kind {
                TokenKind::Directive => {
                    if !self.parse_directive(&mut ast)? {
                        break;
                    }
                }
                TokenKind::Identifier => {
                    let component = self.parse_component()?;
                    if !names.insert(component.name.clone()) {
                        return Err(NodalError::DuplicateComponent {
                            name: component.name,
                        });
                    }
                    ast.components.push(component);
                }
                _ => {
                    return Err(NodalError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.end_of_line()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn end_of_line(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(NodalError::parse(
                self.current.line,
                format!("unexpected trailing token: {:?}", self.current.text),
            )),
        }
    }

    /// Take a node label; numeric labels such as `0` or `12` are allowed.
    fn expect_node(&mut self, owner: &str) -> Result<String> {
        match self.current.kind {
            TokenKind::Identifier | TokenKind::Number => {
                let label = self.current.text.clone();
                self.advance()?;
                Ok(label)
            }
            _ => Err(NodalError::invalid_component(
                owner,
                self.current.line,
                "expected 2 nodes",
            )),
        }
    }

    /// Returns `false` when parsing should stop (`.end`).
    fn parse_directive(&mut self, ast: &mut NetlistAst) -> Result<bool> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".ground" => {
                if ast.ground.is_some() {
                    return Err(NodalError::parse(line, "ground already declared"));
                }
                ast.ground = Some(self.expect_node(".ground")?);
            }
            ".end" => return Ok(false),
            _ => {
                return Err(NodalError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(true)
    }

    fn parse_component(&mut self) -> Result<ComponentDef> {
        let name = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let first_char = name.chars().next().unwrap_or('?');
        let component_type = ComponentType::from_prefix(first_char).ok_or_else(|| {
            NodalError::UnknownComponentType {
                component_type: name.clone(),
                line,
            }
        })?;

        let nodes = [self.expect_node(&name)?, self.expect_node(&name)?];

        // Sources may spell out the DC keyword before the value
        if component_type == ComponentType::VoltageSource
            && self.current.kind == TokenKind::Identifier
            && self.current.text.eq_ignore_ascii_case("DC")
        {
            self.advance()?;
        }

        let value = match self.current.kind {
            TokenKind::Number => {
                let text = self.current.text.clone();
                self.advance()?;
                parse_value(&text).ok_or_else(|| NodalError::parse(line, format!("invalid number: {}", text)))?
            }
            _ => {
                let what = match component_type {
                    ComponentType::Resistor => "resistor requires a value",
                    ComponentType::VoltageSource => "voltage source requires a value",
                };
                return Err(NodalError::invalid_component(&name, line, what));
            }
        };

        Ok(ComponentDef {
            component_type,
            name,
            nodes,
            value,
            line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<NetlistAst> {
        super::super::parse(input)
    }

    #[test]
    fn test_parse_resistor() {
        let ast = parse("R1 in out 10k").unwrap();
        assert_eq!(ast.components.len(), 1);
        assert_eq!(ast.components[0].component_type, ComponentType::Resistor);
        assert_eq!(ast.components[0].name, "R1");
        assert_eq!(ast.components[0].nodes, ["in".to_string(), "out".to_string()]);
        assert_eq!(ast.components[0].value, 10_000.0);
    }

    #[test]
    fn test_parse_source_with_dc_keyword() {
        let ast = parse("VIN 1 0 DC 9\nV2 a b -1.5").unwrap();
        assert_eq!(ast.components[0].component_type, ComponentType::VoltageSource);
        assert_eq!(ast.components[0].nodes, ["1".to_string(), "0".to_string()]);
        assert_eq!(ast.components[0].value, 9.0);
        assert_eq!(ast.components[1].value, -1.5);
        assert_eq!(ast.components[1].line, 2);
    }

    #[test]
    fn test_parse_ground_and_end() {
        let ast = parse(".ground vss\nR1 a vss 1k\n.end\nR2 ignored here 5").unwrap();
        assert_eq!(ast.ground, Some("vss".to_string()));
        assert_eq!(ast.components.len(), 1);
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# This is a comment\nR1 in out 1k ; inline comment style\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.components.len(), 1);
    }

    #[test]
    fn test_missing_value() {
        let err = parse("R1 a b").unwrap_err();
        assert!(matches!(err, NodalError::InvalidComponent { line: 1, .. }));
    }

    #[test]
    fn test_missing_node() {
        let err = parse("\nR1 a\n").unwrap_err();
        assert!(matches!(err, NodalError::InvalidComponent { line: 2, .. }));
    }

    #[test]
    fn test_unknown_component() {
        let err = parse("C1 a b 1u").unwrap_err();
        assert!(matches!(err, NodalError::UnknownComponentType { .. }));
    }

    #[test]
    fn test_trailing_token() {
        let err = parse("R1 a b 1k extra").unwrap_err();
        assert!(matches!(err, NodalError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_name() {
        let err = parse("R1 a 0 1\nR1 b 0 1").unwrap_err();
        assert!(matches!(err, NodalError::DuplicateComponent { .. }));
    }
}
