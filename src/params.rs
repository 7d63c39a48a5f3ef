//! `Parameters`: the ordered, named, `indexed`-flagged parameter list that
//! `<parameters> ::= "(" <named-type> ("," <named-type>)* ")"` yields.

use crate::error::Result;
use crate::grammar::{parse_parameter_list, AbiType};

/// One parameter in a function/event signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub position: usize,
    pub name: String,
    pub ty: AbiType,
    /// Set when the descriptor carried the `indexed` keyword. Relevant to
    /// event topic encoding only; does not affect the canonical type.
    pub indexed: bool,
}

/// An ordered parameter list, e.g. the parsed form of
/// `"(address to, uint256 amount)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters(pub Vec<Param>);

impl Parameters {
    /// Parses a `(named-type, ...)` descriptor.
    pub fn parse(descriptor: &str) -> Result<Parameters> {
        let parsed = parse_parameter_list(descriptor)?;
        let params = parsed
            .into_iter()
            .enumerate()
            .map(|(position, (name, ty, indexed))| Param {
                position,
                name: if name.is_empty() { position.to_string() } else { name },
                ty,
                indexed,
            })
            .collect();
        Ok(Parameters(params))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The canonical tuple type string for this parameter list, e.g.
    /// `"(address,uint256)"`.
    pub fn canonical_type(&self) -> String {
        let parts: Vec<String> = self.0.iter().map(|p| p.ty.canonical()).collect();
        format!("({})", parts.join(","))
    }

    pub fn types(&self) -> impl Iterator<Item = &AbiType> {
        self.0.iter().map(|p| &p.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_parameters() {
        let params = Parameters::parse("(address to, uint256 amount)").unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.0[0].name, "to");
        assert_eq!(params.0[1].name, "amount");
        assert_eq!(params.canonical_type(), "(address,uint256)");
    }

    #[test]
    fn unnamed_parameters_key_by_position() {
        let params = Parameters::parse("(address,uint256)").unwrap();
        assert_eq!(params.0[0].name, "0");
        assert_eq!(params.0[1].name, "1");
    }

    #[test]
    fn indexed_keyword_does_not_affect_canonical_type() {
        let params = Parameters::parse("(address from indexed, uint256 amount)").unwrap();
        assert!(params.0[0].indexed);
        assert!(!params.0[1].indexed);
        assert_eq!(params.canonical_type(), "(address,uint256)");
    }
}
