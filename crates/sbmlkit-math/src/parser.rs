//! Infix formula parser.
//!
//! Recursive descent over the token stream from [`Lexer`], one method
//! per precedence level, lowest first:
//!
//! `or`/`xor` < `and` < relational < additive < multiplicative <
//! unary minus < power (right-associative) < primary.
//!
//! Chains of the associative operators (`+`, `*`, `and`, `or`, `xor`)
//! are collected into a single n-ary node, matching the flat trees
//! their call forms (`and(a, b, c)`) produce; the non-associative
//! operators build binary nodes. Builtin call names are recognized
//! through the keyword table and produce their dedicated node kind;
//! any other identifier followed by `(` becomes a generic function
//! call. The parser performs no recovery: the first lexical or
//! grammatical failure is reported with its byte offset.

use crate::ast::AstNode;
use crate::error::{Error, Result};
use crate::keywords;
use crate::lexer::{Lexer, SpannedToken, Token};
use crate::node_type::NodeType;

/// Parse an infix formula into a tree.
pub fn parse_formula(input: &str) -> Result<AstNode> {
    let tokens = Lexer::new(input).tokenize()?;
    let mut parser = Parser { tokens, pos: 0 };
    let node = parser.parse_or()?;
    parser.expect_eof()?;
    Ok(node)
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos].token
    }

    fn position(&self) -> usize {
        self.tokens[self.pos].position
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].token.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// True if the next token is the given word operator.
    fn at_word(&self, word: &str) -> bool {
        matches!(self.peek(), Token::Identifier(ident) if ident == word)
    }

    fn expect_eof(&self) -> Result<()> {
        if *self.peek() == Token::Eof {
            return Ok(());
        }
        Err(Error::FormulaParse {
            message: format!("trailing input after formula: {:?}", self.peek()),
            position: self.position(),
        })
    }

    fn binary(ty: NodeType, left: AstNode, right: AstNode) -> AstNode {
        let node = AstNode::new(ty);
        node.add_child(left);
        node.add_child(right);
        node
    }

    /// Extend an existing chain of the same associative kind instead
    /// of nesting another binary node.
    fn chain(ty: NodeType, left: AstNode, right: AstNode) -> AstNode {
        if left.node_type() == ty {
            left.add_child(right);
            left
        } else {
            Self::binary(ty, left, right)
        }
    }

    fn parse_or(&mut self) -> Result<AstNode> {
        let mut left = self.parse_and()?;
        loop {
            let ty = if self.at_word("or") || *self.peek() == Token::Or {
                NodeType::Or
            } else if self.at_word("xor") {
                NodeType::Xor
            } else {
                break;
            };
            self.advance();
            let right = self.parse_and()?;
            left = Self::chain(ty, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<AstNode> {
        let mut left = self.parse_relational()?;
        while self.at_word("and") || *self.peek() == Token::And {
            self.advance();
            let right = self.parse_relational()?;
            left = Self::chain(NodeType::And, left, right);
        }
        Ok(left)
    }

    /// Relational operators do not chain: `a < b < c` parses the first
    /// comparison and leaves the rest as trailing input.
    fn parse_relational(&mut self) -> Result<AstNode> {
        let left = self.parse_additive()?;
        let ty = match self.peek() {
            Token::Eq => NodeType::Eq,
            Token::Neq => NodeType::Neq,
            Token::Lt => NodeType::Lt,
            Token::Leq => NodeType::Leq,
            Token::Gt => NodeType::Gt,
            Token::Geq => NodeType::Geq,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_additive()?;
        Ok(Self::binary(ty, left, right))
    }

    fn parse_additive(&mut self) -> Result<AstNode> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let ty = match self.peek() {
                Token::Plus => NodeType::Plus,
                Token::Minus => NodeType::Minus,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = if ty == NodeType::Plus {
                Self::chain(ty, left, right)
            } else {
                Self::binary(ty, left, right)
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<AstNode> {
        let mut left = self.parse_unary()?;
        loop {
            let ty = match self.peek() {
                Token::Star => NodeType::Times,
                Token::Slash => NodeType::Divide,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = if ty == NodeType::Times {
                Self::chain(ty, left, right)
            } else {
                Self::binary(ty, left, right)
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<AstNode> {
        if *self.peek() == Token::Minus {
            self.advance();
            let operand = self.parse_unary()?;
            let node = AstNode::new(NodeType::Minus);
            node.add_child(operand);
            return Ok(node);
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<AstNode> {
        let base = self.parse_primary()?;
        if *self.peek() == Token::Caret {
            self.advance();
            // Right associative; the exponent may carry a unary minus.
            let exponent = self.parse_unary()?;
            return Ok(Self::binary(NodeType::Power, base, exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<AstNode> {
        let position = self.position();
        match self.advance() {
            Token::Integer(value) => Ok(AstNode::new_integer(value)),
            Token::Real(value) => Ok(AstNode::new_real(value)),
            Token::RealExponent { mantissa, exponent } => {
                Ok(AstNode::new_real_exponent(mantissa, exponent))
            }
            Token::LParen => {
                let node = self.parse_or()?;
                if self.advance() != Token::RParen {
                    return Err(Error::FormulaParse {
                        message: "unbalanced parenthesis: expected ')'".into(),
                        position,
                    });
                }
                Ok(node)
            }
            Token::Identifier(name) => {
                if *self.peek() == Token::LParen {
                    self.advance();
                    return self.parse_call(&name, position);
                }
                Ok(Self::reference(&name))
            }
            Token::Eof => Err(Error::FormulaParse {
                message: "unexpected end of formula".into(),
                position,
            }),
            token => Err(Error::FormulaParse {
                message: format!("unexpected token {token:?}"),
                position,
            }),
        }
    }

    /// A bare identifier: a builtin constant keyword, the `time`
    /// symbol, or a free name.
    fn reference(name: &str) -> AstNode {
        match keywords::keyword_type(name) {
            Some(ty) if ty.is_constant() => AstNode::new(ty),
            _ if name == "time" => {
                let node = AstNode::new(NodeType::Time);
                node.set_name(name);
                node
            }
            _ => AstNode::new_name(name),
        }
    }

    /// A call `name(arg0, arg1, ...)`; the opening parenthesis is
    /// already consumed.
    fn parse_call(&mut self, name: &str, position: usize) -> Result<AstNode> {
        let node = match keywords::keyword_type(name) {
            Some(ty)
                if ty.is_builtin_function()
                    || ty.is_logical()
                    || ty.is_relational()
                    || ty == NodeType::Lambda =>
            {
                AstNode::new(ty)
            }
            _ => AstNode::new_function(name),
        };

        if *self.peek() == Token::RParen {
            return Err(Error::FormulaParse {
                message: format!("empty argument list in call of {name:?}"),
                position: self.position(),
            });
        }

        loop {
            node.add_child(self.parse_or()?);
            match self.advance() {
                Token::Comma => continue,
                Token::RParen => break,
                token => {
                    return Err(Error::FormulaParse {
                        message: format!(
                            "expected ',' or ')' in call of {name:?}, found {token:?}"
                        ),
                        position,
                    });
                }
            }
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_name() {
        let tree = parse_formula("k1").unwrap();
        assert_eq!(tree.node_type(), NodeType::Name);
        assert_eq!(tree.name().unwrap(), Some("k1".into()));
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse_formula("42").unwrap().integer().unwrap(), 42);
        assert_eq!(parse_formula("2.5").unwrap().real().unwrap(), 2.5);

        let sci = parse_formula("12.3e3").unwrap();
        assert_eq!(sci.node_type(), NodeType::RealExponent);
        assert_eq!(sci.mantissa().unwrap(), 12.3);
        assert_eq!(sci.exponent().unwrap(), 3);
    }

    #[test]
    fn test_constants_and_time() {
        assert_eq!(parse_formula("pi").unwrap().node_type(), NodeType::ConstantPi);
        assert_eq!(
            parse_formula("exponentiale").unwrap().node_type(),
            NodeType::ConstantE
        );
        assert_eq!(
            parse_formula("true").unwrap().node_type(),
            NodeType::ConstantTrue
        );
        assert_eq!(
            parse_formula("false").unwrap().node_type(),
            NodeType::ConstantFalse
        );

        let time = parse_formula("time").unwrap();
        assert_eq!(time.node_type(), NodeType::Time);
        assert_eq!(time.name().unwrap(), Some("time".into()));
    }

    #[test]
    fn test_precedence() {
        // a + b * c parses the product first.
        let tree = parse_formula("a + b * c").unwrap();
        assert_eq!(tree.node_type(), NodeType::Plus);
        assert_eq!(tree.right_child().unwrap().node_type(), NodeType::Times);

        // (a + b) * c honors the parentheses.
        let tree = parse_formula("(a + b) * c").unwrap();
        assert_eq!(tree.node_type(), NodeType::Times);
        assert_eq!(tree.left_child().unwrap().node_type(), NodeType::Plus);
    }

    #[test]
    fn test_non_associative_operators_nest_left() {
        let tree = parse_formula("a - b - c").unwrap();
        assert_eq!(tree.node_type(), NodeType::Minus);
        assert_eq!(tree.child_count(), 2);
        let left = tree.left_child().unwrap();
        assert_eq!(left.node_type(), NodeType::Minus);
        assert_eq!(left.left_child().unwrap().name().unwrap(), Some("a".into()));
        assert_eq!(tree.right_child().unwrap().name().unwrap(), Some("c".into()));

        let tree = parse_formula("a / b / c").unwrap();
        assert_eq!(tree.node_type(), NodeType::Divide);
        assert_eq!(tree.child_count(), 2);
    }

    #[test]
    fn test_associative_chains_flatten() {
        let tree = parse_formula("a + b + c + d").unwrap();
        assert_eq!(tree.node_type(), NodeType::Plus);
        assert_eq!(tree.child_count(), 4);

        let tree = parse_formula("a * b * c").unwrap();
        assert_eq!(tree.node_type(), NodeType::Times);
        assert_eq!(tree.child_count(), 3);

        // The infix chain and the call form build the same tree.
        let infix = parse_formula("a and b and c").unwrap();
        assert_eq!(infix.child_count(), 3);
        assert_eq!(infix, parse_formula("and(a, b, c)").unwrap());
    }

    #[test]
    fn test_mixed_additive_does_not_flatten() {
        // a + b - c: the minus wraps the plus chain.
        let tree = parse_formula("a + b - c").unwrap();
        assert_eq!(tree.node_type(), NodeType::Minus);
        assert_eq!(tree.child_count(), 2);
        assert_eq!(tree.left_child().unwrap().node_type(), NodeType::Plus);
    }

    #[test]
    fn test_power_is_right_associative() {
        let tree = parse_formula("a ^ b ^ c").unwrap();
        assert_eq!(tree.node_type(), NodeType::Power);
        assert_eq!(tree.left_child().unwrap().name().unwrap(), Some("a".into()));
        assert_eq!(tree.right_child().unwrap().node_type(), NodeType::Power);
    }

    #[test]
    fn test_unary_minus() {
        let tree = parse_formula("-x").unwrap();
        assert!(tree.is_unary_minus());

        // Power binds tighter than unary minus.
        let tree = parse_formula("-x^2").unwrap();
        assert!(tree.is_unary_minus());
        assert_eq!(tree.child(0).unwrap().node_type(), NodeType::Power);

        // A unary minus is allowed in the exponent.
        let tree = parse_formula("2^-3").unwrap();
        assert_eq!(tree.node_type(), NodeType::Power);
        assert!(tree.right_child().unwrap().is_unary_minus());
    }

    #[test]
    fn test_logical_word_operators() {
        let tree = parse_formula("a and b or c").unwrap();
        assert_eq!(tree.node_type(), NodeType::Or);
        assert_eq!(tree.left_child().unwrap().node_type(), NodeType::And);

        let tree = parse_formula("a xor b").unwrap();
        assert_eq!(tree.node_type(), NodeType::Xor);
    }

    #[test]
    fn test_logical_symbol_operators() {
        let tree = parse_formula("a && b || c").unwrap();
        assert_eq!(tree.node_type(), NodeType::Or);
        assert_eq!(tree.left_child().unwrap().node_type(), NodeType::And);
    }

    #[test]
    fn test_relational_operators() {
        for (formula, ty) in [
            ("a < b", NodeType::Lt),
            ("a <= b", NodeType::Leq),
            ("a > b", NodeType::Gt),
            ("a >= b", NodeType::Geq),
            ("a == b", NodeType::Eq),
            ("a = b", NodeType::Eq),
            ("a != b", NodeType::Neq),
        ] {
            assert_eq!(parse_formula(formula).unwrap().node_type(), ty, "{formula}");
        }
    }

    #[test]
    fn test_relational_does_not_chain() {
        let err = parse_formula("a < b < c").unwrap_err();
        assert!(matches!(err, Error::FormulaParse { position: 6, .. }));
    }

    #[test]
    fn test_relational_binds_looser_than_additive() {
        let tree = parse_formula("a + b <= c * d").unwrap();
        assert_eq!(tree.node_type(), NodeType::Leq);
        assert_eq!(tree.left_child().unwrap().node_type(), NodeType::Plus);
        assert_eq!(tree.right_child().unwrap().node_type(), NodeType::Times);
    }

    #[test]
    fn test_builtin_call() {
        let tree = parse_formula("abs(x)").unwrap();
        assert_eq!(tree.node_type(), NodeType::Abs);
        assert_eq!(tree.child_count(), 1);

        let tree = parse_formula("log(10, x)").unwrap();
        assert_eq!(tree.node_type(), NodeType::Log);
        assert!(tree.is_log10());

        let tree = parse_formula("delay(S1, 0.5)").unwrap();
        assert_eq!(tree.node_type(), NodeType::Delay);
    }

    #[test]
    fn test_keyword_call_forms() {
        let tree = parse_formula("and(a, b, c)").unwrap();
        assert_eq!(tree.node_type(), NodeType::And);
        assert_eq!(tree.child_count(), 3);

        let tree = parse_formula("geq(x, 2)").unwrap();
        assert_eq!(tree.node_type(), NodeType::Geq);

        let tree = parse_formula("not(p)").unwrap();
        assert_eq!(tree.node_type(), NodeType::Not);
    }

    #[test]
    fn test_lambda() {
        let tree = parse_formula("lambda(x, y, x + y)").unwrap();
        assert_eq!(tree.node_type(), NodeType::Lambda);
        assert_eq!(tree.child_count(), 3);
        assert_eq!(tree.right_child().unwrap().node_type(), NodeType::Plus);
    }

    #[test]
    fn test_generic_function_fallback() {
        let tree = parse_formula("michaelis(S, Km, Vmax)").unwrap();
        assert_eq!(tree.node_type(), NodeType::Function);
        assert_eq!(tree.name().unwrap(), Some("michaelis".into()));
        assert_eq!(tree.child_count(), 3);
    }

    #[test]
    fn test_nested_calls() {
        let tree = parse_formula("root(2, abs(x - y))").unwrap();
        assert!(tree.is_sqrt());
        assert_eq!(tree.right_child().unwrap().node_type(), NodeType::Abs);
    }

    #[test]
    fn test_unbalanced_parens() {
        assert!(matches!(
            parse_formula("(a + b").unwrap_err(),
            Error::FormulaParse { .. }
        ));
        assert!(matches!(
            parse_formula("a + b)").unwrap_err(),
            Error::FormulaParse { position: 5, .. }
        ));
    }

    #[test]
    fn test_empty_input() {
        let err = parse_formula("").unwrap_err();
        assert_eq!(
            err,
            Error::FormulaParse {
                message: "unexpected end of formula".into(),
                position: 0,
            }
        );
        assert!(parse_formula("   ").is_err());
    }

    #[test]
    fn test_empty_argument() {
        assert!(parse_formula("f()").is_err());
        assert!(parse_formula("f(a, )").is_err());
        assert!(parse_formula("f(, a)").is_err());
    }

    #[test]
    fn test_dangling_operator() {
        assert!(parse_formula("a +").is_err());
        assert!(parse_formula("* a").is_err());
        assert!(parse_formula("a and").is_err());
    }

    #[test]
    fn test_trailing_garbage() {
        let err = parse_formula("a + b c").unwrap_err();
        assert!(matches!(err, Error::FormulaParse { position: 6, .. }));
    }

    #[test]
    fn test_kinetic_law_shape() {
        let tree = parse_formula("k1 * S1 * compartment / (Km + S1)").unwrap();
        assert_eq!(tree.node_type(), NodeType::Divide);
        assert!(tree.refers_to("Km"));
        assert!(tree.refers_to("k1"));
    }
}
