use crate::{
    ast::{
        ast::{Stmt, TypeSlot},
        statements::{AssignmentStmt, Block, ExpressionStmt, ForStmt, IfStmt, Lvalue, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

/// Parses one statement. A trailing semicolon is optional everywhere.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        let stmt = handler(parser)?;
        parser.eat(TokenKind::Semicolon);
        return Ok(stmt);
    }

    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    let stmt = if parser.eat(TokenKind::Assignment) {
        let rvalue = parse_expr(parser, BindingPower::Default)?;
        Stmt::Assignment(AssignmentStmt {
            lvalue: Lvalue::Path(expr),
            rvalue,
            span: parser.span_from(start),
            ty: TypeSlot::new(),
        })
    } else {
        Stmt::Expression(ExpressionStmt {
            span: expr.get_span().clone(),
            expression: expr,
            ty: TypeSlot::new(),
        })
    };

    parser.eat(TokenKind::Semicolon);

    Ok(stmt)
}

/// `let name (: Type)? = expr` and `var name (: Type)? = expr`.
pub fn parse_declaration_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance().clone();

    let error = Error::new(ErrorImpl::UnexpectedTokenDetailed { token: parser.current_token().value.clone(), message: String::from("expected identifier during variable declaration") }, parser.get_position());
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let annotation = if parser.eat(TokenKind::Colon) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let error = Error::new(ErrorImpl::UnexpectedTokenDetailed { token: parser.current_token().value.clone(), message: String::from("expected rhs in variable declaration") }, parser.get_position());
    parser.expect_error(TokenKind::Assignment, Some(error))?;
    let rvalue = parse_expr(parser, BindingPower::Default)?;

    let lvalue = if start_token.kind == TokenKind::Var {
        Lvalue::Var { name, annotation }
    } else {
        Lvalue::Let { name, annotation }
    };

    Ok(Stmt::Assignment(AssignmentStmt {
        lvalue,
        rvalue,
        span: parser.span_from(start_token.span.start),
        ty: TypeSlot::new(),
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::If(IfStmt {
        condition,
        body: Box::new(body),
        span: parser.span_from(start),
    }))
}

/// `for init; condition; increment { body }`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    // parse_stmt swallows the separator after the init statement
    let init = parse_stmt(parser)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;
    let increment = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::For(ForStmt {
        init: Box::new(init),
        condition,
        increment,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = if parser.current_token().is_one_of_many(&[TokenKind::Semicolon, TokenKind::CloseCurly, TokenKind::EOF]) {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: parser.span_from(start),
        ty: TypeSlot::new(),
    }))
}

pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(Error::new(ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected }"),
            }, parser.get_position()));
        }
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Block {
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_block_as_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}
