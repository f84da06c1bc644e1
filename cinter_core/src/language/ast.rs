use std::fmt;
use crate::language::operators::BinaryOperator;

/// An object literal entry. `value: None` is the shorthand `{ key }` form.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Option<Box<AstNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Program(Vec<AstNode>),
    VariableDeclaration {
        name: String,
        constant: bool,
        initializer: Option<Box<AstNode>>,
    },
    ExpressionStatement(Box<AstNode>),
    NumericLiteral(f64),
    Identifier(String),
    BinaryExpression {
        left: Box<AstNode>,
        operator: BinaryOperator,
        right: Box<AstNode>,
    },
    AssignmentExpression {
        target: Box<AstNode>,
        value: Box<AstNode>,
    },
    ObjectLiteral(Vec<Property>),
    MemberExpression {
        object: Box<AstNode>,
        property: Box<AstNode>,
        computed: bool,
    },
    CallExpression {
        callee: Box<AstNode>,
        args: Vec<AstNode>,
    },
}

impl AstNode {
    pub fn identifier(name: impl Into<String>) -> Self {
        AstNode::Identifier(name.into())
    }

    pub fn number(value: f64) -> Self {
        AstNode::NumericLiteral(value)
    }

    pub fn binary(left: AstNode, operator: BinaryOperator, right: AstNode) -> Self {
        AstNode::BinaryExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Assignment targets are names and member expressions.
    pub fn is_assignable(&self) -> bool {
        matches!(self, AstNode::Identifier(_) | AstNode::MemberExpression { .. })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            AstNode::Program(_) => "Program",
            AstNode::VariableDeclaration { .. } => "VariableDeclaration",
            AstNode::ExpressionStatement(_) => "ExpressionStatement",
            AstNode::NumericLiteral(_) => "NumericLiteral",
            AstNode::Identifier(_) => "Identifier",
            AstNode::BinaryExpression { .. } => "BinaryExpression",
            AstNode::AssignmentExpression { .. } => "AssignmentExpression",
            AstNode::ObjectLiteral(_) => "ObjectLiteral",
            AstNode::MemberExpression { .. } => "MemberExpression",
            AstNode::CallExpression { .. } => "CallExpression",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {}", self.key, value),
            None => write!(f, "{}", self.key),
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AstNode::Program(statements) => {
                for stmt in statements {
                    writeln!(f, "{}", stmt)?;
                }
                Ok(())
            },
            AstNode::VariableDeclaration { name, constant, initializer } => {
                let keyword = if *constant { "const" } else { "let" };
                match initializer {
                    Some(value) => write!(f, "{} {} = {};", keyword, name, value),
                    None => write!(f, "{} {};", keyword, name),
                }
            },
            AstNode::ExpressionStatement(expression) => write!(f, "{};", expression),
            AstNode::NumericLiteral(value) => write!(f, "{}", value),
            AstNode::Identifier(name) => write!(f, "{}", name),
            AstNode::BinaryExpression { left, operator, right } => {
                write!(f, "({} {} {})", left, operator, right)
            },
            AstNode::AssignmentExpression { target, value } => write!(f, "{} = {}", target, value),
            AstNode::ObjectLiteral(properties) => {
                if properties.is_empty() {
                    return write!(f, "{{}}");
                }
                let props: Vec<String> = properties.iter().map(|p| p.to_string()).collect();
                write!(f, "{{ {} }}", props.join(", "))
            },
            AstNode::MemberExpression { object, property, computed } => {
                if *computed {
                    write!(f, "{}[{}]", object, property)
                } else {
                    write!(f, "{}.{}", object, property)
                }
            },
            AstNode::CallExpression { callee, args } => {
                let args_str: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
                write!(f, "{}({})", callee, args_str.join(", "))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_as_source() {
        let node = AstNode::VariableDeclaration {
            name: "x".to_string(),
            constant: true,
            initializer: Some(Box::new(AstNode::binary(
                AstNode::number(5.0),
                BinaryOperator::Add,
                AstNode::CallExpression {
                    callee: Box::new(AstNode::MemberExpression {
                        object: Box::new(AstNode::identifier("o")),
                        property: Box::new(AstNode::identifier("f")),
                        computed: false,
                    }),
                    args: vec![AstNode::number(1.0), AstNode::identifier("y")],
                },
            ))),
        };
        assert_eq!(node.to_string(), "const x = (5 + o.f(1, y));");

        let object = AstNode::ObjectLiteral(vec![
            Property { key: "a".to_string(), value: Some(Box::new(AstNode::number(1.0))) },
            Property { key: "b".to_string(), value: None },
        ]);
        assert_eq!(object.to_string(), "{ a: 1, b }");
    }

    #[test]
    fn only_names_and_members_are_assignable() {
        assert!(AstNode::identifier("x").is_assignable());
        assert!(AstNode::MemberExpression {
            object: Box::new(AstNode::identifier("o")),
            property: Box::new(AstNode::number(0.0)),
            computed: true,
        }
        .is_assignable());
        assert!(!AstNode::number(1.0).is_assignable());
        assert!(!AstNode::ObjectLiteral(vec![]).is_assignable());
    }
}
