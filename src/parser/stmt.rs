use crate::{ast::{ast::{Expr, Stmt}, statements::{AssignmentStmt, BlockStmt, ExpressionStmt, FnDeclStmt, IfStmt, ReturnStmt, VarDeclStmt}}, errors::errors::{Error, ErrorImpl}, lexer::tokens::TokenKind, parser::{expr::parse_expr, lookups::BindingPower}, Span};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.get_stmt_lookup().contains_key(&parser.current_token_kind()) {
        return parser.get_stmt_lookup().get(&parser.current_token_kind()).unwrap()(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;

    // A bare identifier followed by `=` starts an assignment statement
    if parser.current_token_kind() == TokenKind::Assignment {
        let target = match expr {
            Expr::Symbol(symbol) => symbol,
            _ => {
                return Err(Error::new(ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("only a variable can be assigned to")
                }, parser.get_position()));
            }
        };

        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Semicolon)?;

        return Ok(Stmt::Assignment(AssignmentStmt {
            span: Span {
                start: target.span.start.clone(),
                end: parser.get_position()
            },
            target: target.value,
            value,
        }));
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: expr.get_span().clone(),
        expression: expr,
    }))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let explicit_type;
    let assigned_value;

    let start_token = parser.advance().clone();

    let error = Error::new(ErrorImpl::UnexpectedTokenDetailed { token: parser.current_token().value.clone(), message: String::from("expected identifier during variable declaration") }, parser.get_position());
    let variable_name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        explicit_type = Some(parse_type(parser)?);
    } else {
        explicit_type = None;
    }

    if parser.current_token_kind() != TokenKind::Semicolon {
        parser.expect(TokenKind::Assignment)?;
        assigned_value = Some(parse_expr(parser, BindingPower::Default)?);
    } else {
        assigned_value = None;
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        span: Span {
            start: start_token.span.start.clone(),
            end: parser.get_position()
        },
        identifier: variable_name,
        assigned_value,
        explicit_type
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let id = parser.advance_id();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let then_body = parse_block_stmt(parser)?;

    let else_body;
    if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            else_body = Some(Box::new(parse_if_stmt(parser)?));
        } else {
            else_body = Some(Box::new(Stmt::Block(parse_block_stmt(parser)?)));
        }
    } else {
        else_body = None;
    }

    Ok(Stmt::If(IfStmt {
        condition,
        then_body,
        else_body,
        id,
        span: Span {
            start,
            end: parser.get_position()
        }
    }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start.clone();
    let id = parser.advance_id();

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body: statements,
        id,
        span: Span {
            start,
            end: parser.get_position()
        }
    })
}

pub fn parse_nested_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block_stmt(parser)?))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<FnDeclStmt, Error> {
    let start = parser.advance().span.start.clone();
    let id = parser.advance_id();

    let identifier = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        let name = parser.expect(TokenKind::Identifier)?.value;
        parser.expect(TokenKind::Colon)?;
        let ty = parse_type(parser)?;
        parameters.push((name, ty));

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let return_type;
    if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        return_type = Some(parse_type(parser)?);
    } else {
        return_type = None;
    }

    let body = parse_block_stmt(parser)?;

    Ok(FnDeclStmt {
        span: Span {
            start,
            end: parser.get_position()
        },
        identifier,
        parameters,
        return_type,
        body,
        id,
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value;
    if parser.current_token_kind() != TokenKind::Semicolon {
        value = Some(parse_expr(parser, BindingPower::Default)?);
    } else {
        value = None;
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: Span {
            start,
            end: parser.get_position()
        }
    }))
}
