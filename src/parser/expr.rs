use crate::{ast::{ast::Expr, expressions::{BinaryExpr, BoolExpr, CallExpr, CharExpr, GroupingExpr, NumberExpr, PrefixExpr, SymbolExpr}}, errors::errors::{Error, ErrorImpl}, lexer::tokens::TokenKind, Span};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    if !parser.get_nud_lookup().contains_key(&token_kind) {
        return Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position()));
    }

    let mut left = parser.get_nud_lookup().get(&token_kind).unwrap()(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while *parser.get_bp_lookup().get(&parser.current_token_kind()).unwrap_or(&BindingPower::Default) > bp {
        let token_kind = parser.current_token_kind();
        if !parser.get_led_lookup().contains_key(&token_kind) {
            return Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position()));
        }

        left = parser.get_led_lookup().get(&token_kind).unwrap()(parser, left, *parser.get_bp_lookup().get(&parser.current_token_kind()).unwrap())?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let result = parser.current_token().value.parse();

            if result.is_err() {
                Err(Error::new(ErrorImpl::NumberParseError { token: parser.current_token().value.clone() }, parser.get_position()))
            } else {
                let id = parser.advance_id();
                Ok(Expr::Number(NumberExpr { value: result.unwrap(), id, span: parser.advance().span.clone() }))
            }
        },
        TokenKind::Char => {
            let mut chars = parser.current_token().value.chars();
            let value = chars.next();

            if value.is_none() || chars.next().is_some() {
                Err(Error::new(ErrorImpl::CharParseError { token: parser.current_token().value.clone() }, parser.get_position()))
            } else {
                let id = parser.advance_id();
                Ok(Expr::Char(CharExpr { value: value.unwrap(), id, span: parser.advance().span.clone() }))
            }
        },
        TokenKind::True | TokenKind::False => {
            let id = parser.advance_id();
            let token = parser.advance();
            Ok(Expr::Bool(BoolExpr { value: token.kind == TokenKind::True, id, span: token.span.clone() }))
        },
        TokenKind::Identifier => {
            let id = parser.advance_id();
            Ok(Expr::Symbol(SymbolExpr { value: parser.current_token().value.clone(), id, span: parser.advance().span.clone() }))
        },
        _ => {
            Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position()))
        }
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone()
        },
        left: Box::new(left),
        operator: operator_token,
        right: Box::new(right),
        id: parser.advance_id(),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: rhs.get_span().end.clone()
        },
        operator: operator_token,
        right_expr: Box::new(rhs),
        id: parser.advance_id(),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let inner = parse_expr(parser, BindingPower::Default)?;
    let end_token = parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Grouping(GroupingExpr {
        inner: Box::new(inner),
        id: parser.advance_id(),
        span: Span {
            start,
            end: end_token.span.end.clone()
        }
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let mut args = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: parser.get_position()
        },
        callee: Box::new(left),
        arguments: args,
        id: parser.advance_id(),
    }))
}
