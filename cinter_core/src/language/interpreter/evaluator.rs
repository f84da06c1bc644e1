use log::{debug, trace};
use crate::language::ast::{AstNode, Property};
use crate::language::environment::Environment;
use crate::language::error::Result;
use crate::language::operators::BinaryOperator;
use crate::language::value::{Properties, Value};
use crate::runtime_error;

/// Tree-walking evaluator over one environment.
///
/// Recursion depth follows the nesting depth of the tree, so very deep
/// expressions are bounded by the host stack.
pub struct Evaluator<'a> {
    env: &'a mut Environment,
}

impl<'a> Evaluator<'a> {
    pub fn new(env: &'a mut Environment) -> Self {
        Evaluator { env }
    }

    pub fn evaluate(&mut self, node: &AstNode) -> Result<Value> {
        trace!("Evaluating {}", node.kind_name());
        match node {
            AstNode::Program(statements) => self.evaluate_program(statements),
            AstNode::VariableDeclaration { name, constant, initializer } =>
                self.evaluate_var_declaration(name, *constant, initializer.as_deref()),
            AstNode::ExpressionStatement(expression) => self.evaluate(expression),
            AstNode::NumericLiteral(value) => Ok(Value::Number(*value)),
            AstNode::Identifier(name) => self.env.lookup(name),
            AstNode::BinaryExpression { left, operator, right } =>
                self.evaluate_binary_expression(left, *operator, right),
            AstNode::AssignmentExpression { target, value } =>
                self.evaluate_assignment(target, value),
            AstNode::ObjectLiteral(properties) => self.evaluate_object_literal(properties),
            AstNode::MemberExpression { object, property, computed } =>
                self.evaluate_member_expression(object, property, *computed),
            AstNode::CallExpression { callee, args } => self.evaluate_call(callee, args),
        }
    }

    fn evaluate_program(&mut self, statements: &[AstNode]) -> Result<Value> {
        let mut last = Value::Null;
        for statement in statements {
            last = self.evaluate(statement)?;
        }
        Ok(last)
    }

    fn evaluate_var_declaration(&mut self, name: &str, constant: bool, initializer: Option<&AstNode>) -> Result<Value> {
        let value = match initializer {
            Some(expression) => self.evaluate(expression)?,
            None => Value::Null,
        };
        debug!("Declaring '{}' = {}", name, value);
        self.env.declare(name, value, constant)
    }

    fn evaluate_binary_expression(&mut self, left: &AstNode, operator: BinaryOperator, right: &AstNode) -> Result<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match (&left, &right) {
            (Value::Number(l), Value::Number(r)) => Ok(Value::Number(operator.apply(*l, *r))),
            _ => runtime_error!(
                TypeMismatch,
                format!(
                    "Cannot apply '{}' to {} and {}",
                    operator,
                    left.type_name(),
                    right.type_name()
                )
            ),
        }
    }

    fn evaluate_assignment(&mut self, target: &AstNode, value: &AstNode) -> Result<Value> {
        let value = self.evaluate(value)?;

        match target {
            AstNode::Identifier(name) => {
                debug!("Assigning '{}' = {}", name, value);
                self.env.assign(name, value)
            }
            AstNode::MemberExpression { object, property, computed } => {
                let object = self.evaluate(object)?;
                let Value::Object(properties) = &object else {
                    return runtime_error!(
                        TypeMismatch,
                        format!("Cannot set a property on a value of type {}", object.type_name())
                    );
                };
                let key = self.property_key(property, *computed)?;
                if value.reaches(properties) {
                    return runtime_error!(
                        TypeMismatch,
                        format!("Cannot store an object inside itself (property '{}')", key)
                    );
                }
                debug!("Setting property '{}' = {}", key, value);
                properties.borrow_mut().insert(key, value.clone());
                Ok(value)
            }
            other => runtime_error!(
                TypeMismatch,
                format!("Invalid assignment target: {}", other.kind_name())
            ),
        }
    }

    fn evaluate_object_literal(&mut self, properties: &[Property]) -> Result<Value> {
        let mut object = Properties::new();

        for Property { key, value } in properties {
            let value = match value {
                Some(expression) => self.evaluate(expression)?,
                None => self.env.lookup(key)?,
            };
            object.insert(key.clone(), value);
        }

        Ok(Value::object(object))
    }

    fn evaluate_member_expression(&mut self, object: &AstNode, property: &AstNode, computed: bool) -> Result<Value> {
        let object = self.evaluate(object)?;
        let Value::Object(properties) = &object else {
            return runtime_error!(
                TypeMismatch,
                format!("Cannot read a property of a value of type {}", object.type_name())
            );
        };

        let key = self.property_key(property, computed)?;
        let found = properties.borrow().get(&key).cloned();
        match found {
            Some(value) => Ok(value),
            None => runtime_error!(
                UndefinedProperty,
                format!("Property '{}' does not exist on {}", key, object)
            ),
        }
    }

    /// `o.name` uses the identifier text. `o[expr]` evaluates `expr` and turns
    /// numbers, booleans and null into their printed text.
    fn property_key(&mut self, property: &AstNode, computed: bool) -> Result<String> {
        if !computed {
            return match property {
                AstNode::Identifier(name) => Ok(name.clone()),
                other => runtime_error!(
                    TypeMismatch,
                    format!("Property name must be an identifier, found {}", other.kind_name())
                ),
            };
        }

        let key = self.evaluate(property)?;
        match key {
            // -0 and 0 name the same property
            Value::Number(n) if n == 0.0 => Ok("0".to_string()),
            Value::Number(_) | Value::Boolean(_) | Value::Null => Ok(key.to_string()),
            other => runtime_error!(
                TypeMismatch,
                format!("A value of type {} cannot be used as a property key", other.type_name())
            ),
        }
    }

    fn evaluate_call(&mut self, callee: &AstNode, args: &[AstNode]) -> Result<Value> {
        let callee = self.evaluate(callee)?;
        let Value::NativeFunction(function) = &callee else {
            return runtime_error!(
                TypeMismatch,
                format!("Cannot call a value of type {}", callee.type_name())
            );
        };

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate(arg)?);
        }

        trace!("Calling native '{}' with {} argument(s)", function.name, values.len());
        function.call(values, self.env)
    }
}

pub fn evaluate(node: &AstNode, env: &mut Environment) -> Result<Value> {
    Evaluator::new(env).evaluate(node)
}
