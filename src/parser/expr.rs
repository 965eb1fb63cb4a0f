use crate::{
    ast::{
        ast::{Expr, TypeSlot},
        expressions::{
            BinaryExpr, CallItem, ChainExpr, ChainItem, FunctionExpr, GroupExpr, IndexItem, Literal,
            LiteralExpr, Parameter, PropertyItem,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block, types::parse_type};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(ErrorImpl::UnexpectedToken { token: parser.current_token().value.clone() }, parser.get_position()));
    };

    let mut left = nud(parser)?;

    // While there is a LED whose binding power beats the current one, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else { break };
        let next_bp = parser.get_bp_lookup().get(&token_kind).copied().unwrap_or(BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    let value = match token.kind {
        TokenKind::Number => match token.value.parse::<i64>() {
            Ok(number) => Literal::Integer(number),
            Err(_) => return Err(Error::new(ErrorImpl::NumberParseError { token: token.value.clone() }, token.span.start.clone())),
        },
        TokenKind::String => Literal::String(token.value.clone()),
        TokenKind::True => Literal::Boolean(true),
        TokenKind::False => Literal::Boolean(false),
        _ => return Err(Error::new(ErrorImpl::UnexpectedToken { token: token.value.clone() }, token.span.start.clone())),
    };
    parser.advance();

    Ok(Expr::Literal(LiteralExpr { value, span: token.span, ty: TypeSlot::new() }))
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
        ty: TypeSlot::new(),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let inner = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Group(GroupExpr {
        inner: Box::new(inner),
        span: parser.span_from(start),
        ty: TypeSlot::new(),
    }))
}

/// Parses a name and its trailing calls, property accesses and indexes.
pub fn parse_chain_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let name_token = parser.expect(TokenKind::Identifier)?;
    let mut tail = vec![];

    loop {
        let start = parser.get_position();
        match parser.current_token_kind() {
            TokenKind::OpenParen => {
                parser.advance();
                let mut arguments = vec![];
                while parser.current_token_kind() != TokenKind::CloseParen {
                    arguments.push(parse_expr(parser, BindingPower::Default)?);
                    if !parser.eat(TokenKind::Comma) {
                        break;
                    }
                }
                parser.expect(TokenKind::CloseParen)?;
                tail.push(ChainItem::Call(CallItem { arguments, span: parser.span_from(start) }));
            },
            TokenKind::Dot => {
                parser.advance();
                let name = parser.expect(TokenKind::Identifier)?.value;
                tail.push(ChainItem::Property(PropertyItem { name, span: parser.span_from(start) }));
            },
            TokenKind::OpenBracket => {
                parser.advance();
                let index = parse_expr(parser, BindingPower::Default)?;
                parser.expect(TokenKind::CloseBracket)?;
                tail.push(ChainItem::Index(IndexItem { index: Box::new(index), span: parser.span_from(start) }));
            },
            _ => break,
        }
    }

    Ok(Expr::Chain(ChainExpr {
        span: parser.span_from(name_token.span.start.clone()),
        name: name_token.value,
        tail,
        ty: TypeSlot::new(),
    }))
}

/// `fn(a: A, b) -> R { ... }`; annotations are optional at the syntax level.
pub fn parse_function_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        let name_token = parser.expect(TokenKind::Identifier)?;
        let annotation = if parser.eat(TokenKind::Colon) {
            Some(parse_type(parser)?)
        } else {
            None
        };
        parameters.push(Parameter {
            span: parser.span_from(name_token.span.start.clone()),
            name: name_token.value,
            annotation,
        });

        if !parser.eat(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.eat(TokenKind::Arrow) {
        Some(parse_type(parser)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(Expr::Function(FunctionExpr {
        parameters,
        return_type,
        body,
        span: parser.span_from(start),
        ty: TypeSlot::new(),
    }))
}
