//! Chalk productions
//!
//! Binary operator levels are left-recursive with both flags set, so
//! `a - b - c` comes out as `((a - b) - c)` and a level with no operator present
//! disappears from the tree.
//!
//! Nothing is memoized. An operand that is not followed by an assignment operator
//! is parsed again by `ConditionalExpression`, which itself parses its
//! `LogicalOrExpression` twice when no `?` follows. Every level of nested
//! parentheses or call arguments multiplies the work by that factor, so the cost
//! of `x = ((((1))));` grows exponentially with the nesting: in a release build
//! ten levels take about a second and thirteen take tens of seconds. Statement
//! and operator chains are unaffected.

use super::tokens::ChalkToken as T;
use crate::chalk::error::GrammarError;
use crate::chalk::grammar::{Flags, Grammar, ProductionId, Symbol};
use crate::chalk::lexer::{RuleTable, TokenId};
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum ChalkNode {
    ListElementList,
    List,
    DictElement,
    DictElementList,
    Dict,
    PrimaryExpression,
    PostfixExpression,
    ArgumentExpressionList,
    UnaryExpression,
    UnaryOperator,
    MultiplicativeExpression,
    AdditiveExpression,
    ShiftExpression,
    RelationalExpression,
    EqualityExpression,
    AndExpression,
    ExclusiveOrExpression,
    InclusiveOrExpression,
    LogicalAndExpression,
    LogicalOrExpression,
    ConditionalExpression,
    AssignmentExpression,
    AssignmentOperator,
    Expression,
    Statement,
    CompoundStatement,
    StatementList,
    ExpressionStatement,
    SelectionStatement,
    IterationStatement,
    JumpStatement,
    TranslationUnit,
    ExternalDeclaration,
    IdentifierList,
    FunctionDefinition,
}

impl ChalkNode {
    pub fn from_id(id: ProductionId) -> Option<Self> {
        Self::try_from(id.0).ok()
    }

    pub fn id(self) -> ProductionId {
        ProductionId(self.into())
    }
}

impl From<ChalkNode> for ProductionId {
    fn from(node: ChalkNode) -> Self {
        node.id()
    }
}

use ChalkNode as N;

const fn t(token: T) -> Symbol {
    Symbol::Terminal(TokenId(token as u16))
}

const fn n(node: N) -> Symbol {
    Symbol::Nonterminal(ProductionId(node as u16))
}

const C: Flags = Flags::COLLAPSE;
const L: Flags = Flags::FLATTEN_LEFT_RECURSION;
const CL: Flags = Flags::COLLAPSE.union(Flags::FLATTEN_LEFT_RECURSION);

const LIST_ELEMENT_LIST: &[&[Symbol]] = &[
    &[n(N::ConditionalExpression)],
    &[n(N::ListElementList), t(T::Comma), n(N::ConditionalExpression)],
];

const LIST: &[&[Symbol]] = &[
    &[t(T::OpenBracket), t(T::CloseBracket)],
    &[t(T::OpenBracket), n(N::ListElementList), t(T::CloseBracket)],
    &[t(T::OpenBracket), n(N::ListElementList), t(T::Comma), t(T::CloseBracket)],
];

const DICT_ELEMENT: &[&[Symbol]] = &[&[
    n(N::Expression),
    t(T::Colon),
    n(N::ConditionalExpression),
]];

const DICT_ELEMENT_LIST: &[&[Symbol]] = &[
    &[n(N::DictElement)],
    &[n(N::DictElementList), t(T::Comma), n(N::DictElement)],
];

const DICT: &[&[Symbol]] = &[
    &[t(T::OpenBrace), t(T::CloseBrace)],
    &[t(T::OpenBrace), n(N::DictElementList), t(T::CloseBrace)],
    &[t(T::OpenBrace), n(N::DictElementList), t(T::Comma), t(T::CloseBrace)],
];

const PRIMARY_EXPRESSION: &[&[Symbol]] = &[
    &[t(T::Identifier)],
    &[t(T::HexInteger)],
    &[t(T::OctalInteger)],
    &[t(T::DecimalInteger)],
    &[t(T::StringLiteral)],
    &[t(T::Null)],
    &[n(N::Dict)],
    &[n(N::List)],
    &[t(T::OpenParentheses), n(N::Expression), t(T::CloseParentheses)],
];

const POSTFIX_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::PrimaryExpression)],
    &[n(N::PostfixExpression), t(T::OpenBracket), n(N::Expression), t(T::CloseBracket)],
    &[
        n(N::PostfixExpression),
        t(T::OpenParentheses),
        n(N::ArgumentExpressionList),
        t(T::CloseParentheses),
    ],
    &[n(N::PostfixExpression), t(T::OpenParentheses), t(T::CloseParentheses)],
    &[n(N::PostfixExpression), t(T::Increment)],
    &[n(N::PostfixExpression), t(T::Decrement)],
];

const ARGUMENT_EXPRESSION_LIST: &[&[Symbol]] = &[
    &[n(N::AssignmentExpression)],
    &[n(N::ArgumentExpressionList), t(T::Comma), n(N::AssignmentExpression)],
];

const UNARY_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::PostfixExpression)],
    &[t(T::Increment), n(N::UnaryExpression)],
    &[t(T::Decrement), n(N::UnaryExpression)],
    &[n(N::UnaryOperator), n(N::UnaryExpression)],
];

const UNARY_OPERATOR: &[&[Symbol]] = &[
    &[t(T::Plus)],
    &[t(T::Minus)],
    &[t(T::BitNot)],
    &[t(T::LogicalNot)],
];

const MULTIPLICATIVE_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::UnaryExpression)],
    &[n(N::MultiplicativeExpression), t(T::Asterisk), n(N::UnaryExpression)],
    &[n(N::MultiplicativeExpression), t(T::Divide), n(N::UnaryExpression)],
    &[n(N::MultiplicativeExpression), t(T::Modulo), n(N::UnaryExpression)],
];

const ADDITIVE_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::MultiplicativeExpression)],
    &[n(N::AdditiveExpression), t(T::Plus), n(N::MultiplicativeExpression)],
    &[n(N::AdditiveExpression), t(T::Minus), n(N::MultiplicativeExpression)],
];

const SHIFT_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::AdditiveExpression)],
    &[n(N::ShiftExpression), t(T::LeftShift), n(N::AdditiveExpression)],
    &[n(N::ShiftExpression), t(T::RightShift), n(N::AdditiveExpression)],
];

const RELATIONAL_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::ShiftExpression)],
    &[n(N::RelationalExpression), t(T::LessThan), n(N::ShiftExpression)],
    &[n(N::RelationalExpression), t(T::GreaterThan), n(N::ShiftExpression)],
    &[n(N::RelationalExpression), t(T::LessOrEqual), n(N::ShiftExpression)],
    &[n(N::RelationalExpression), t(T::GreaterOrEqual), n(N::ShiftExpression)],
];

const EQUALITY_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::RelationalExpression)],
    &[n(N::EqualityExpression), t(T::IsEqual), n(N::RelationalExpression)],
    &[n(N::EqualityExpression), t(T::IsNotEqual), n(N::RelationalExpression)],
];

const AND_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::EqualityExpression)],
    &[n(N::AndExpression), t(T::BitAnd), n(N::EqualityExpression)],
];

const EXCLUSIVE_OR_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::AndExpression)],
    &[n(N::ExclusiveOrExpression), t(T::Xor), n(N::AndExpression)],
];

const INCLUSIVE_OR_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::ExclusiveOrExpression)],
    &[n(N::InclusiveOrExpression), t(T::BitOr), n(N::ExclusiveOrExpression)],
];

const LOGICAL_AND_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::InclusiveOrExpression)],
    &[n(N::LogicalAndExpression), t(T::LogicalAnd), n(N::InclusiveOrExpression)],
];

const LOGICAL_OR_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::LogicalAndExpression)],
    &[n(N::LogicalOrExpression), t(T::LogicalOr), n(N::LogicalAndExpression)],
];

const CONDITIONAL_EXPRESSION: &[&[Symbol]] = &[
    &[
        n(N::LogicalOrExpression),
        t(T::Question),
        n(N::Expression),
        t(T::Colon),
        n(N::ConditionalExpression),
    ],
    &[n(N::LogicalOrExpression)],
];

const ASSIGNMENT_EXPRESSION: &[&[Symbol]] = &[
    &[n(N::UnaryExpression), n(N::AssignmentOperator), n(N::AssignmentExpression)],
    &[n(N::ConditionalExpression)],
];

const ASSIGNMENT_OPERATOR: &[&[Symbol]] = &[
    &[t(T::Assign)],
    &[t(T::MultiplyAssign)],
    &[t(T::DivideAssign)],
    &[t(T::ModuloAssign)],
    &[t(T::AddAssign)],
    &[t(T::SubtractAssign)],
    &[t(T::LeftAssign)],
    &[t(T::RightAssign)],
    &[t(T::AndAssign)],
    &[t(T::XorAssign)],
    &[t(T::OrAssign)],
    &[t(T::NullAssign)],
];

const EXPRESSION: &[&[Symbol]] = &[
    &[n(N::AssignmentExpression)],
    &[n(N::Expression), t(T::Comma), n(N::AssignmentExpression)],
];

// A `{` opens a block before it is tried as a dict literal, so `if (a) {} -x;`
// keeps `-x;` as its own statement. `{a: 1};` still falls through to a dict.
const STATEMENT: &[&[Symbol]] = &[
    &[n(N::CompoundStatement)],
    &[n(N::ExpressionStatement)],
    &[n(N::SelectionStatement)],
    &[n(N::IterationStatement)],
    &[n(N::JumpStatement)],
];

const COMPOUND_STATEMENT: &[&[Symbol]] = &[
    &[t(T::OpenBrace), t(T::CloseBrace)],
    &[t(T::OpenBrace), n(N::StatementList), t(T::CloseBrace)],
];

const STATEMENT_LIST: &[&[Symbol]] = &[
    &[n(N::Statement)],
    &[n(N::StatementList), n(N::Statement)],
];

const EXPRESSION_STATEMENT: &[&[Symbol]] = &[
    &[t(T::Semicolon)],
    &[n(N::Expression), t(T::Semicolon)],
];

// The else-binding alternative comes first: an `else` attaches to the nearest `if`.
const SELECTION_STATEMENT: &[&[Symbol]] = &[
    &[
        t(T::If),
        t(T::OpenParentheses),
        n(N::Expression),
        t(T::CloseParentheses),
        n(N::Statement),
        t(T::Else),
        n(N::Statement),
    ],
    &[
        t(T::If),
        t(T::OpenParentheses),
        n(N::Expression),
        t(T::CloseParentheses),
        n(N::Statement),
    ],
];

const ITERATION_STATEMENT: &[&[Symbol]] = &[
    &[
        t(T::While),
        t(T::OpenParentheses),
        n(N::Expression),
        t(T::CloseParentheses),
        n(N::Statement),
    ],
    &[
        t(T::Do),
        n(N::Statement),
        t(T::While),
        t(T::OpenParentheses),
        n(N::Expression),
        t(T::CloseParentheses),
        t(T::Semicolon),
    ],
    &[
        t(T::For),
        t(T::OpenParentheses),
        t(T::Identifier),
        t(T::In),
        n(N::Expression),
        t(T::CloseParentheses),
        n(N::Statement),
    ],
    &[
        t(T::For),
        t(T::OpenParentheses),
        n(N::ExpressionStatement),
        n(N::ExpressionStatement),
        t(T::CloseParentheses),
        n(N::Statement),
    ],
    &[
        t(T::For),
        t(T::OpenParentheses),
        n(N::ExpressionStatement),
        n(N::ExpressionStatement),
        n(N::Expression),
        t(T::CloseParentheses),
        n(N::Statement),
    ],
];

const JUMP_STATEMENT: &[&[Symbol]] = &[
    &[t(T::Break), t(T::Semicolon)],
    &[t(T::Continue), t(T::Semicolon)],
    &[t(T::Return), t(T::Semicolon)],
    &[t(T::Return), n(N::Expression), t(T::Semicolon)],
];

const TRANSLATION_UNIT: &[&[Symbol]] = &[
    &[n(N::ExternalDeclaration)],
    &[n(N::TranslationUnit), n(N::ExternalDeclaration)],
];

const EXTERNAL_DECLARATION: &[&[Symbol]] = &[&[n(N::FunctionDefinition)], &[n(N::Statement)]];

const IDENTIFIER_LIST: &[&[Symbol]] = &[
    &[t(T::Identifier)],
    &[n(N::IdentifierList), t(T::Comma), t(T::Identifier)],
];

const FUNCTION_DEFINITION: &[&[Symbol]] = &[
    &[
        t(T::Function),
        t(T::Identifier),
        t(T::OpenParentheses),
        t(T::CloseParentheses),
        n(N::CompoundStatement),
    ],
    &[
        t(T::Function),
        t(T::Identifier),
        t(T::OpenParentheses),
        n(N::IdentifierList),
        t(T::CloseParentheses),
        n(N::CompoundStatement),
    ],
];

/// (production, name, flags, alternatives) in id order.
pub const PRODUCTIONS: &[(ChalkNode, &str, Flags, &[&[Symbol]])] = &[
    (N::ListElementList, "ListElementList", L, LIST_ELEMENT_LIST),
    (N::List, "List", Flags::NONE, LIST),
    (N::DictElement, "DictElement", Flags::NONE, DICT_ELEMENT),
    (N::DictElementList, "DictElementList", L, DICT_ELEMENT_LIST),
    (N::Dict, "Dict", Flags::NONE, DICT),
    (N::PrimaryExpression, "PrimaryExpression", C, PRIMARY_EXPRESSION),
    (N::PostfixExpression, "PostfixExpression", CL, POSTFIX_EXPRESSION),
    (N::ArgumentExpressionList, "ArgumentExpressionList", L, ARGUMENT_EXPRESSION_LIST),
    (N::UnaryExpression, "UnaryExpression", C, UNARY_EXPRESSION),
    (N::UnaryOperator, "UnaryOperator", Flags::NONE, UNARY_OPERATOR),
    (N::MultiplicativeExpression, "MultiplicativeExpression", CL, MULTIPLICATIVE_EXPRESSION),
    (N::AdditiveExpression, "AdditiveExpression", CL, ADDITIVE_EXPRESSION),
    (N::ShiftExpression, "ShiftExpression", CL, SHIFT_EXPRESSION),
    (N::RelationalExpression, "RelationalExpression", CL, RELATIONAL_EXPRESSION),
    (N::EqualityExpression, "EqualityExpression", CL, EQUALITY_EXPRESSION),
    (N::AndExpression, "AndExpression", CL, AND_EXPRESSION),
    (N::ExclusiveOrExpression, "ExclusiveOrExpression", CL, EXCLUSIVE_OR_EXPRESSION),
    (N::InclusiveOrExpression, "InclusiveOrExpression", CL, INCLUSIVE_OR_EXPRESSION),
    (N::LogicalAndExpression, "LogicalAndExpression", CL, LOGICAL_AND_EXPRESSION),
    (N::LogicalOrExpression, "LogicalOrExpression", CL, LOGICAL_OR_EXPRESSION),
    (N::ConditionalExpression, "ConditionalExpression", C, CONDITIONAL_EXPRESSION),
    (N::AssignmentExpression, "AssignmentExpression", C, ASSIGNMENT_EXPRESSION),
    (N::AssignmentOperator, "AssignmentOperator", Flags::NONE, ASSIGNMENT_OPERATOR),
    (N::Expression, "Expression", CL, EXPRESSION),
    (N::Statement, "Statement", C, STATEMENT),
    (N::CompoundStatement, "CompoundStatement", Flags::NONE, COMPOUND_STATEMENT),
    (N::StatementList, "StatementList", L, STATEMENT_LIST),
    (N::ExpressionStatement, "ExpressionStatement", Flags::NONE, EXPRESSION_STATEMENT),
    (N::SelectionStatement, "SelectionStatement", Flags::NONE, SELECTION_STATEMENT),
    (N::IterationStatement, "IterationStatement", Flags::NONE, ITERATION_STATEMENT),
    (N::JumpStatement, "JumpStatement", Flags::NONE, JUMP_STATEMENT),
    (N::TranslationUnit, "TranslationUnit", L, TRANSLATION_UNIT),
    (N::ExternalDeclaration, "ExternalDeclaration", C, EXTERNAL_DECLARATION),
    (N::IdentifierList, "IdentifierList", L, IDENTIFIER_LIST),
    (N::FunctionDefinition, "FunctionDefinition", Flags::NONE, FUNCTION_DEFINITION),
];

pub fn grammar(tokens: &RuleTable) -> Result<Grammar, GrammarError> {
    PRODUCTIONS
        .iter()
        .fold(Grammar::builder(), |builder, &(node, name, flags, alternatives)| {
            builder.production(node, name, flags, alternatives)
        })
        .build(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chalk::lang::tokens::rule_table;

    #[test]
    fn test_table_covers_every_node_in_order() {
        for (index, (node, _, _, _)) in PRODUCTIONS.iter().enumerate() {
            assert_eq!(u16::from(*node) as usize, index);
        }
        assert_eq!(PRODUCTIONS.len(), N::FunctionDefinition as usize + 1);
    }

    #[test]
    fn test_grammar_validates() {
        let tokens = rule_table().unwrap();
        let grammar = grammar(&tokens).unwrap();
        assert_eq!(grammar.len(), PRODUCTIONS.len());
        assert_eq!(grammar.find("SelectionStatement"), Some(N::SelectionStatement.id()));
    }

    #[test]
    fn test_operator_levels_are_flattened() {
        let tokens = rule_table().unwrap();
        let grammar = grammar(&tokens).unwrap();
        for production in grammar.productions() {
            if production.is_left_recursive() {
                assert!(
                    production.flags().flatten_left_recursion(),
                    "{} is left-recursive without the flag",
                    production.name()
                );
            }
        }
        let additive = grammar.production(N::AdditiveExpression.id());
        assert_eq!(additive.seeds().count(), 1);
        assert_eq!(additive.extensions().count(), 2);
    }
}
