//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::annotations::Block;
use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse script source code into an AST
pub fn parse(input: &str) -> Result<Document, Vec<crate::ParseError>> {
    let len = input.len();

    // Create a logos lexer and convert to token stream
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    document_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn document_parser<'a, I>() -> impl Parser<'a, I, Document, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // Basic token parsers
    let identifier = select! {
        Token::Ident(s) => Identifier::new(s),
    }
    .map_with(|id, e| Spanned::new(id, span_range(&e.span())));

    let string_literal = select! {
        Token::String(s) => s,
    };

    let number = just(Token::Minus)
        .or_not()
        .then(select! {
            Token::Int(n) => n as f64,
            Token::Float(x) => x,
        })
        .map(|(minus, x)| if minus.is_some() { -x } else { x })
        .map_with(|x, e| Spanned::new(x, span_range(&e.span())));

    // Value expressions
    let expr = recursive(|expr| {
        let literal = select! {
            Token::Int(n) => Expr::Int(n),
            Token::Float(x) => Expr::Float(x),
            Token::String(s) => Expr::Str(s),
            Token::Char(c) => Expr::Char(c),
            Token::True => Expr::Bool(true),
            Token::False => Expr::Bool(false),
            Token::Byte(b) => Expr::Byte(b),
            Token::None => Expr::None,
        };

        let negative = just(Token::Minus).ignore_then(select! {
            Token::Int(n) => Expr::Int(-n),
            Token::Float(x) => Expr::Float(-x),
        });

        let some = just(Token::Some)
            .ignore_then(
                expr.clone()
                    .delimited_by(just(Token::ParenOpen), just(Token::ParenClose)),
            )
            .map(|inner| Expr::Some(Box::new(inner)));

        let list = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
            .map(Expr::List);

        // A single parenthesized expression is grouping, more than one is a tuple
        let parens = expr
            .clone()
            .separated_by(just(Token::Comma))
            .at_least(1)
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::ParenOpen), just(Token::ParenClose))
            .map(|mut members: Vec<Spanned<Expr>>| {
                if members.len() == 1 {
                    members.remove(0).node
                } else {
                    Expr::Tuple(members)
                }
            });

        choice((literal, negative, some, list, parens))
            .map_with(|x, e| Spanned::new(x, span_range(&e.span())))
            .boxed()
    });

    // Annotation content
    let inline = choice((
        string_literal.clone().map(InlineExpr::Text),
        just(Token::Emph)
            .ignore_then(string_literal.clone())
            .map(InlineExpr::Emph),
        just(Token::Code)
            .ignore_then(string_literal.clone())
            .map(InlineExpr::Code),
        just(Token::Samp)
            .ignore_then(string_literal.clone())
            .map(InlineExpr::Samp),
        just(Token::Link)
            .ignore_then(string_literal.clone())
            .then(string_literal.clone())
            .map(|(href, caption)| InlineExpr::Link { href, caption }),
    ))
    .map_with(|i, e| Spanned::new(i, span_range(&e.span())));

    let block_kind = choice((
        just(Token::Paragraph).to(Block::Paragraph),
        just(Token::Section).to(Block::Section),
        just(Token::Subsection).to(Block::Subsection),
        just(Token::Subsubsection).to(Block::Subsubsection),
    ));

    let annotation = block_kind
        .then(inline.repeated().at_least(1).collect::<Vec<_>>())
        .map(|(block, content)| Statement::Annotation { block, content });

    let print = just(Token::Print)
        .ignore_then(expr.clone())
        .map(Statement::Print);

    let let_decl = just(Token::Let)
        .ignore_then(identifier.clone())
        .then_ignore(just(Token::Equals))
        .then(expr.clone())
        .map(|(name, value)| Statement::Let { name, value });

    // Plot: plot s1, s2 [x_min: 0, y_tick_base: 10]
    let plot_option = identifier
        .then_ignore(just(Token::Colon))
        .then(number)
        .map_with(|(key, value), e| Spanned::new(PlotOption { key, value }, span_range(&e.span())));

    let plot_options = plot_option
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    let plot = just(Token::Plot)
        .ignore_then(
            expr.clone()
                .separated_by(just(Token::Comma))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .then(plot_options.or_not())
        .map(|(series, options)| {
            Statement::Plot(PlotDecl {
                series,
                options: options.unwrap_or_default(),
            })
        });

    // Recursive statement parser
    let statement = recursive(|stmt| {
        let boxed = just(Token::Box)
            .ignore_then(
                stmt.repeated()
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::BraceOpen), just(Token::BraceClose)),
            )
            .map(Statement::Box);

        choice((
            print.clone(),
            let_decl.clone(),
            annotation.clone(),
            plot.clone(),
            boxed,
        ))
        .map_with(|s, e| Spanned::new(s, span_range(&e.span())))
        .boxed()
    });

    // Document is a list of statements
    statement
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|statements| Document { statements })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(source: &str) -> Statement {
        let doc = parse(source).expect("Should parse");
        assert_eq!(doc.statements.len(), 1);
        doc.statements.into_iter().next().unwrap().node
    }

    fn printed(source: &str) -> Expr {
        match single(source) {
            Statement::Print(expr) => expr.node,
            other => panic!("Expected print, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(printed("print 42"), Expr::Int(42));
        assert_eq!(printed("print -7"), Expr::Int(-7));
        assert_eq!(printed("print -2.5"), Expr::Float(-2.5));
        assert_eq!(printed("print 'x'"), Expr::Char('x'));
        assert_eq!(printed("print true"), Expr::Bool(true));
        assert_eq!(printed("print 0x41"), Expr::Byte(0x41));
        assert_eq!(printed("print none"), Expr::None);
        assert_eq!(printed(r#"print "hi""#), Expr::Str("hi".to_string()));
    }

    #[test]
    fn test_parse_nested_list() {
        match printed("print [[1, 2], [3, 4, 5]]") {
            Expr::List(rows) => {
                assert_eq!(rows.len(), 2);
                assert!(matches!(&rows[1].node, Expr::List(items) if items.len() == 3));
            }
            other => panic!("Expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_tuple_and_grouping() {
        match printed(r#"print ("pi", 3.14, 'c')"#) {
            Expr::Tuple(members) => assert_eq!(members.len(), 3),
            other => panic!("Expected tuple, got {:?}", other),
        }
        assert_eq!(printed("print (5)"), Expr::Int(5));
    }

    #[test]
    fn test_parse_some() {
        match printed("print some([1])") {
            Expr::Some(inner) => assert!(matches!(inner.node, Expr::List(_))),
            other => panic!("Expected some, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_let() {
        match single("let total = (1, 2)") {
            Statement::Let { name, value } => {
                assert_eq!(name.node.as_str(), "total");
                assert_eq!(name.span, 4..9);
                assert!(matches!(value.node, Expr::Tuple(_)));
            }
            other => panic!("Expected let, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_annotation() {
        match single(r#"paragraph "See " link "https://example.org" "docs" " and " code "x""#) {
            Statement::Annotation { block, content } => {
                assert_eq!(block, Block::Paragraph);
                assert_eq!(content.len(), 4);
                assert_eq!(
                    content[1].node,
                    InlineExpr::Link {
                        href: "https://example.org".to_string(),
                        caption: "docs".to_string()
                    }
                );
                assert_eq!(content[3].node, InlineExpr::Code("x".to_string()));
            }
            other => panic!("Expected annotation, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_headings() {
        let doc = parse(r#"section "A" subsection "B" subsubsection "C""#).expect("Should parse");
        let blocks: Vec<_> = doc
            .statements
            .iter()
            .map(|s| match &s.node {
                Statement::Annotation { block, .. } => *block,
                other => panic!("Expected annotation, got {:?}", other),
            })
            .collect();
        assert_eq!(
            blocks,
            vec![Block::Section, Block::Subsection, Block::Subsubsection]
        );
    }

    #[test]
    fn test_parse_box() {
        match single("box { print 1 box { print 2 } }") {
            Statement::Box(children) => {
                assert_eq!(children.len(), 2);
                assert!(matches!(&children[1].node, Statement::Box(inner) if inner.len() == 1));
            }
            other => panic!("Expected box, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_plot_with_options() {
        match single("plot [(0, 0), (1, 1)], [(0, 1), (1, 0)] [x_min: -1, y_tick_base: 10]") {
            Statement::Plot(decl) => {
                assert_eq!(decl.series.len(), 2);
                assert_eq!(decl.options.len(), 2);
                assert_eq!(decl.options[0].node.key.node.as_str(), "x_min");
                assert_eq!(decl.options[0].node.value.node, -1.0);
                assert_eq!(decl.options[1].node.value.node, 10.0);
            }
            other => panic!("Expected plot, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_plot_without_options() {
        match single("plot [(0, 0), (1, 1)]") {
            Statement::Plot(decl) => {
                assert_eq!(decl.series.len(), 1);
                assert!(decl.options.is_empty());
            }
            other => panic!("Expected plot, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_multiple_statements() {
        let doc = parse(
            r#"
            section "Values"
            print 1
            let x = [1, 2]
        "#,
        )
        .expect("Should parse");
        assert_eq!(doc.statements.len(), 3);
    }

    #[test]
    fn test_parse_error_reports_span() {
        let errors = parse("print [1, 2").unwrap_err();
        assert!(!errors.is_empty());
        let crate::ParseError::Syntax { span, .. } = &errors[0];
        assert_eq!(span.start, 11);
    }

    #[test]
    fn test_reserved_word_as_name() {
        let errors = parse("let print = 1").unwrap_err();
        let crate::ParseError::Syntax { message, .. } = &errors[0];
        assert!(message.contains("keyword 'print'"), "{}", message);
    }
}
