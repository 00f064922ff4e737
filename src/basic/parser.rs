//! Recursive-descent parser: token stream -> `Program`.

use crate::basic::ast::*;
use crate::basic::token::{Keyword, Token, TokenKind};
use crate::basic::value::Value;
use crate::error::{EngineError, EngineResult, SourcePos};

pub fn parse(tokens: Vec<Token>) -> EngineResult<Program> {
    let mut parser = Parser { tokens, pos: 0 };
    parser.parse_program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let t = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn pos_here(&self) -> SourcePos {
        self.peek().pos
    }

    fn syntax_error(&self, expected: &str) -> EngineError {
        let pos = self.pos_here();
        EngineError::SyntaxError {
            line: pos.line,
            column: pos.column,
            expected: expected.into(),
            got: format!("{:?}", self.peek().kind),
        }
    }

    fn expect_kind(&mut self, kind: TokenKind) -> EngineResult<()> {
        if self.peek().kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.syntax_error(&format!("{kind:?}")))
        }
    }

    fn expect_keyword(&mut self, kw: Keyword) -> EngineResult<()> {
        self.expect_kind(TokenKind::Keyword(kw))
    }

    fn expect_identifier(&mut self) -> EngineResult<String> {
        match self.peek().kind.clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.syntax_error("identifier")),
        }
    }

    fn expect_integer(&mut self) -> EngineResult<i64> {
        match self.peek().kind.clone() {
            TokenKind::IntegerLiteral(n) => {
                self.advance();
                Ok(n)
            }
            _ => Err(self.syntax_error("line number")),
        }
    }

    fn parse_program(&mut self) -> EngineResult<Program> {
        let mut program = Program::new();
        loop {
            while matches!(self.peek().kind, TokenKind::Newline) {
                self.advance();
            }
            if matches!(self.peek().kind, TokenKind::Eof) {
                break;
            }
            let line_no = self.expect_integer()? as u32;
            let stmts = self.parse_stmts_until(|k| matches!(k, TokenKind::Newline | TokenKind::Eof))?;
            program.entry(line_no).or_insert_with(Vec::new).extend(stmts);
            match self.peek().kind {
                TokenKind::Newline => {
                    self.advance();
                }
                TokenKind::Eof => {}
                _ => return Err(self.syntax_error("end of line")),
            }
        }
        Ok(program)
    }

    fn parse_stmts_until(&mut self, stop: impl Fn(&TokenKind) -> bool) -> EngineResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        loop {
            if stop(&self.peek().kind) {
                break;
            }
            stmts.push(self.parse_statement()?);
            if matches!(self.peek().kind, TokenKind::Colon) {
                self.advance();
                continue;
            }
            break;
        }
        Ok(stmts)
    }

    fn parse_lvalue(&mut self) -> EngineResult<LValue> {
        let name = self.expect_identifier()?;
        let indices = if matches!(self.peek().kind, TokenKind::LParen) {
            self.advance();
            let args = self.parse_expr_list(TokenKind::RParen)?;
            self.expect_kind(TokenKind::RParen)?;
            args
        } else {
            Vec::new()
        };
        Ok(LValue { name, indices })
    }

    fn parse_expr_list(&mut self, terminator: TokenKind) -> EngineResult<Vec<Expr>> {
        let mut exprs = Vec::new();
        if self.peek().kind == terminator {
            return Ok(exprs);
        }
        exprs.push(self.parse_expr()?);
        while matches!(self.peek().kind, TokenKind::Comma) {
            self.advance();
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    fn parse_statement(&mut self) -> EngineResult<Stmt> {
        match self.peek().kind.clone() {
            TokenKind::Keyword(Keyword::Let) => {
                self.advance();
                let lvalue = self.parse_lvalue()?;
                self.expect_kind(TokenKind::Equal)?;
                Ok(Stmt::Let(lvalue, self.parse_expr()?))
            }
            TokenKind::Identifier(name) if name == "SYS" => {
                self.advance();
                Ok(Stmt::Sys(self.parse_expr()?))
            }
            TokenKind::Identifier(_) => {
                let lvalue = self.parse_lvalue()?;
                self.expect_kind(TokenKind::Equal)?;
                Ok(Stmt::Let(lvalue, self.parse_expr()?))
            }
            TokenKind::Keyword(Keyword::Print) => {
                self.advance();
                self.parse_print()
            }
            TokenKind::Keyword(Keyword::Input) => {
                self.advance();
                self.parse_input()
            }
            TokenKind::Keyword(Keyword::If) => {
                self.advance();
                self.parse_if()
            }
            TokenKind::Keyword(Keyword::Else) => {
                self.advance();
                Ok(Stmt::ElseBlock)
            }
            TokenKind::Keyword(Keyword::Endif) => {
                self.advance();
                Ok(Stmt::EndIfBlock)
            }
            TokenKind::Keyword(Keyword::For) => {
                self.advance();
                self.parse_for()
            }
            TokenKind::Keyword(Keyword::Next) => {
                self.advance();
                let var = match self.peek().kind.clone() {
                    TokenKind::Identifier(name) => {
                        self.advance();
                        Some(name)
                    }
                    _ => None,
                };
                Ok(Stmt::Next(var))
            }
            TokenKind::Keyword(Keyword::While) => {
                self.advance();
                Ok(Stmt::While(self.parse_expr()?))
            }
            TokenKind::Keyword(Keyword::Wend) => {
                self.advance();
                Ok(Stmt::Wend)
            }
            TokenKind::Keyword(Keyword::Do) => {
                self.advance();
                Ok(Stmt::Do)
            }
            TokenKind::Keyword(Keyword::Loop) => {
                self.advance();
                match self.peek().kind.clone() {
                    TokenKind::Keyword(Keyword::While) => {
                        self.advance();
                        Ok(Stmt::LoopWhile(self.parse_expr()?))
                    }
                    TokenKind::Keyword(Keyword::Until) => {
                        self.advance();
                        Ok(Stmt::LoopUntil(self.parse_expr()?))
                    }
                    _ => Ok(Stmt::LoopForever),
                }
            }
            TokenKind::Keyword(Keyword::Goto) => {
                self.advance();
                Ok(Stmt::Goto(self.expect_integer()? as u32))
            }
            TokenKind::Keyword(Keyword::Gosub) => {
                self.advance();
                Ok(Stmt::Gosub(self.expect_integer()? as u32))
            }
            TokenKind::Keyword(Keyword::Return) => {
                self.advance();
                Ok(Stmt::Return)
            }
            TokenKind::Keyword(Keyword::On) => {
                self.advance();
                let expr = self.parse_expr()?;
                let is_goto = match self.peek().kind.clone() {
                    TokenKind::Keyword(Keyword::Goto) => {
                        self.advance();
                        true
                    }
                    TokenKind::Keyword(Keyword::Gosub) => {
                        self.advance();
                        false
                    }
                    _ => return Err(self.syntax_error("GOTO or GOSUB")),
                };
                let mut targets = vec![self.expect_integer()? as u32];
                while matches!(self.peek().kind, TokenKind::Comma) {
                    self.advance();
                    targets.push(self.expect_integer()? as u32);
                }
                Ok(if is_goto {
                    Stmt::OnGoto(expr, targets)
                } else {
                    Stmt::OnGosub(expr, targets)
                })
            }
            TokenKind::Keyword(Keyword::Dim) => {
                self.advance();
                let mut dims = Vec::new();
                loop {
                    let name = self.expect_identifier()?;
                    self.expect_kind(TokenKind::LParen)?;
                    let dims_list = self.parse_expr_list(TokenKind::RParen)?;
                    self.expect_kind(TokenKind::RParen)?;
                    dims.push((name, dims_list));
                    if matches!(self.peek().kind, TokenKind::Comma) {
                        self.advance();
                        continue;
                    }
                    break;
                }
                Ok(Stmt::Dim(dims))
            }
            TokenKind::Keyword(Keyword::Read) => {
                self.advance();
                let mut targets = vec![self.parse_lvalue()?];
                while matches!(self.peek().kind, TokenKind::Comma) {
                    self.advance();
                    targets.push(self.parse_lvalue()?);
                }
                Ok(Stmt::Read(targets))
            }
            TokenKind::Keyword(Keyword::Data) => {
                self.advance();
                self.parse_data()
            }
            TokenKind::Keyword(Keyword::Restore) => {
                self.advance();
                let target = match self.peek().kind.clone() {
                    TokenKind::IntegerLiteral(n) => {
                        self.advance();
                        Some(n as u32)
                    }
                    _ => None,
                };
                Ok(Stmt::Restore(target))
            }
            TokenKind::Keyword(Keyword::Def) => {
                self.advance();
                self.expect_keyword(Keyword::Fn)?;
                let name = self.expect_identifier()?;
                self.expect_kind(TokenKind::LParen)?;
                let mut params = Vec::new();
                if !matches!(self.peek().kind, TokenKind::RParen) {
                    params.push(self.expect_identifier()?);
                    while matches!(self.peek().kind, TokenKind::Comma) {
                        self.advance();
                        params.push(self.expect_identifier()?);
                    }
                }
                self.expect_kind(TokenKind::RParen)?;
                self.expect_kind(TokenKind::Equal)?;
                let body = self.parse_expr()?;
                Ok(Stmt::DefFn { name, params, body })
            }
            TokenKind::Keyword(Keyword::Rem) => {
                self.advance();
                Ok(Stmt::Rem)
            }
            TokenKind::Keyword(Keyword::End) => {
                self.advance();
                Ok(Stmt::End)
            }
            TokenKind::Keyword(Keyword::Stop) => {
                self.advance();
                Ok(Stmt::Stop)
            }
            _ => Err(self.syntax_error("statement")),
        }
    }

    fn parse_print(&mut self) -> EngineResult<Stmt> {
        let mut items = Vec::new();
        let terminator = |k: &TokenKind| {
            matches!(
                k,
                TokenKind::Newline | TokenKind::Eof | TokenKind::Colon | TokenKind::Keyword(Keyword::Else)
            )
        };
        loop {
            if terminator(&self.peek().kind) {
                break;
            }
            let expr = self.parse_expr()?;
            let sep = match self.peek().kind {
                TokenKind::Comma => {
                    self.advance();
                    Some(PrintSep::Comma)
                }
                TokenKind::Semicolon => {
                    self.advance();
                    Some(PrintSep::Semicolon)
                }
                _ => None,
            };
            items.push(PrintItem {
                expr,
                trailing_sep: sep,
            });
            if sep.is_none() {
                break;
            }
            if terminator(&self.peek().kind) {
                break;
            }
        }
        Ok(Stmt::Print(items))
    }

    fn parse_input(&mut self) -> EngineResult<Stmt> {
        let prompt = match self.peek().kind.clone() {
            TokenKind::String(s) => {
                self.advance();
                self.expect_kind(TokenKind::Semicolon)?;
                Some(s)
            }
            _ => None,
        };
        let mut targets = vec![self.parse_lvalue()?];
        while matches!(self.peek().kind, TokenKind::Comma) {
            self.advance();
            targets.push(self.parse_lvalue()?);
        }
        Ok(Stmt::Input { prompt, targets })
    }

    fn parse_if(&mut self) -> EngineResult<Stmt> {
        let cond = self.parse_expr()?;
        self.expect_keyword(Keyword::Then)?;
        if matches!(self.peek().kind, TokenKind::Newline | TokenKind::Eof) {
            return Ok(Stmt::IfBlockStart(cond));
        }
        let then_branch = if let TokenKind::IntegerLiteral(n) = self.peek().kind {
            self.advance();
            vec![Stmt::Goto(n as u32)]
        } else {
            self.parse_stmts_until(|k| {
                matches!(
                    k,
                    TokenKind::Newline | TokenKind::Eof | TokenKind::Keyword(Keyword::Else)
                )
            })?
        };
        let else_branch = if matches!(self.peek().kind, TokenKind::Keyword(Keyword::Else)) {
            self.advance();
            if let TokenKind::IntegerLiteral(n) = self.peek().kind {
                self.advance();
                Some(vec![Stmt::Goto(n as u32)])
            } else {
                Some(self.parse_stmts_until(|k| matches!(k, TokenKind::Newline | TokenKind::Eof))?)
            }
        } else {
            None
        };
        Ok(Stmt::IfThen {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn parse_for(&mut self) -> EngineResult<Stmt> {
        let var = self.expect_identifier()?;
        self.expect_kind(TokenKind::Equal)?;
        let from = self.parse_expr()?;
        self.expect_keyword(Keyword::To)?;
        let to = self.parse_expr()?;
        let step = if matches!(self.peek().kind, TokenKind::Keyword(Keyword::Step)) {
            self.advance();
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Stmt::For { var, from, to, step })
    }

    fn parse_data(&mut self) -> EngineResult<Stmt> {
        let mut values = Vec::new();
        loop {
            let negate = if matches!(self.peek().kind, TokenKind::Minus) {
                self.advance();
                true
            } else {
                false
            };
            let value = match self.peek().kind.clone() {
                TokenKind::String(s) => {
                    self.advance();
                    Value::Str(s)
                }
                TokenKind::IntegerLiteral(n) => {
                    self.advance();
                    Value::Integer(if negate { -n } else { n })
                }
                TokenKind::Number(n) => {
                    self.advance();
                    Value::Number(if negate { -n } else { n })
                }
                TokenKind::Identifier(s) => {
                    self.advance();
                    Value::Str(s)
                }
                _ => return Err(self.syntax_error("DATA literal")),
            };
            values.push(value);
            if matches!(self.peek().kind, TokenKind::Comma) {
                self.advance();
                continue;
            }
            break;
        }
        Ok(Stmt::Data(values))
    }

    fn parse_expr(&mut self) -> EngineResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> EngineResult<Expr> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek().kind, TokenKind::Keyword(Keyword::Or)) {
            let pos = self.pos_here();
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::Binary(BinaryOp::Or, Box::new(lhs), Box::new(rhs), pos);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> EngineResult<Expr> {
        let mut lhs = self.parse_not()?;
        while matches!(self.peek().kind, TokenKind::Keyword(Keyword::And)) {
            let pos = self.pos_here();
            self.advance();
            let rhs = self.parse_not()?;
            lhs = Expr::Binary(BinaryOp::And, Box::new(lhs), Box::new(rhs), pos);
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> EngineResult<Expr> {
        if matches!(self.peek().kind, TokenKind::Keyword(Keyword::Not)) {
            let pos = self.pos_here();
            self.advance();
            let inner = self.parse_not()?;
            Ok(Expr::Unary(UnaryOp::Not, Box::new(inner), pos))
        } else {
            self.parse_comparison()
        }
    }

    fn parse_comparison(&mut self) -> EngineResult<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Equal => BinaryOp::Eq,
                TokenKind::NotEqual => BinaryOp::Ne,
                TokenKind::Less => BinaryOp::Lt,
                TokenKind::LessEqual => BinaryOp::Le,
                TokenKind::Greater => BinaryOp::Gt,
                TokenKind::GreaterEqual => BinaryOp::Ge,
                _ => break,
            };
            let pos = self.pos_here();
            self.advance();
            let rhs = self.parse_additive()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs), pos);
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> EngineResult<Expr> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let pos = self.pos_here();
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs), pos);
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> EngineResult<Expr> {
        let mut lhs = self.parse_power()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Keyword(Keyword::Mod) => BinaryOp::Mod,
                _ => break,
            };
            let pos = self.pos_here();
            self.advance();
            let rhs = self.parse_power()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs), pos);
        }
        Ok(lhs)
    }

    fn parse_power(&mut self) -> EngineResult<Expr> {
        let base = self.parse_unary()?;
        if matches!(self.peek().kind, TokenKind::Caret) {
            let pos = self.pos_here();
            self.advance();
            let rhs = self.parse_power()?;
            Ok(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(rhs), pos))
        } else {
            Ok(base)
        }
    }

    fn parse_unary(&mut self) -> EngineResult<Expr> {
        match self.peek().kind {
            TokenKind::Minus => {
                let pos = self.pos_here();
                self.advance();
                Ok(Expr::Unary(UnaryOp::Neg, Box::new(self.parse_unary()?), pos))
            }
            TokenKind::Plus => {
                let pos = self.pos_here();
                self.advance();
                Ok(Expr::Unary(UnaryOp::Pos, Box::new(self.parse_unary()?), pos))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> EngineResult<Expr> {
        match self.peek().kind.clone() {
            TokenKind::IntegerLiteral(n) => {
                self.advance();
                Ok(Expr::IntegerLit(n))
            }
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::NumberLit(n))
            }
            TokenKind::String(s) => {
                self.advance();
                Ok(Expr::StringLit(s))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if matches!(self.peek().kind, TokenKind::LParen) {
                    self.advance();
                    let args = self.parse_expr_list(TokenKind::RParen)?;
                    self.expect_kind(TokenKind::RParen)?;
                    Ok(Expr::Call(name, args))
                } else {
                    Ok(Expr::Var(name))
                }
            }
            TokenKind::Keyword(Keyword::Fn) => {
                self.advance();
                let name = self.expect_identifier()?;
                self.expect_kind(TokenKind::LParen)?;
                let args = self.parse_expr_list(TokenKind::RParen)?;
                self.expect_kind(TokenKind::RParen)?;
                Ok(Expr::Call(format!("FN{name}"), args))
            }
            TokenKind::Keyword(kw @ (Keyword::Left | Keyword::Right | Keyword::Mid | Keyword::Chr | Keyword::Str)) => {
                self.advance();
                self.expect_kind(TokenKind::LParen)?;
                let args = self.parse_expr_list(TokenKind::RParen)?;
                self.expect_kind(TokenKind::RParen)?;
                Ok(Expr::Call(builtin_keyword_name(kw), args))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect_kind(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.syntax_error("expression")),
        }
    }
}

fn builtin_keyword_name(kw: Keyword) -> String {
    match kw {
        Keyword::Left => "LEFT$",
        Keyword::Right => "RIGHT$",
        Keyword::Mid => "MID$",
        Keyword::Chr => "CHR$",
        Keyword::Str => "STR$",
        _ => unreachable!(),
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::token::Tokenizer;

    fn parse_src(src: &str) -> Program {
        parse(Tokenizer::new(src).tokenize().unwrap()).unwrap()
    }

    #[test]
    fn parses_sum_of_squares_program() {
        let program = parse_src(
            "10 S = 0\n20 FOR I = 1 TO 5\n30 S = S + I*I\n40 NEXT I\n50 PRINT S\n",
        );
        assert_eq!(program.len(), 5);
        assert!(matches!(program[&20][0], Stmt::For { .. }));
        assert!(matches!(program[&40][0], Stmt::Next(Some(_))));
    }

    #[test]
    fn parses_single_line_if_then_else() {
        let program = parse_src("10 IF X > 0 THEN PRINT \"POS\" ELSE PRINT \"NEG\"\n");
        match &program[&10][0] {
            Stmt::IfThen {
                then_branch,
                else_branch,
                ..
            } => {
                assert_eq!(then_branch.len(), 1);
                assert!(else_branch.is_some());
            }
            other => panic!("expected IfThen, got {other:?}"),
        }
    }

    #[test]
    fn parses_left_dollar_call() {
        let program = parse_src("10 PRINT LEFT$(A$,3)\n");
        match &program[&10][0] {
            Stmt::Print(items) => match &items[0].expr {
                Expr::Call(name, args) => {
                    assert_eq!(name, "LEFT$");
                    assert_eq!(args.len(), 2);
                }
                other => panic!("expected Call, got {other:?}"),
            },
            other => panic!("expected Print, got {other:?}"),
        }
    }

    #[test]
    fn parses_gosub_return_program() {
        let program = parse_src("10 GOSUB 100\n20 PRINT \"B\"\n30 END\n100 PRINT \"A\"\n110 RETURN\n");
        assert!(matches!(program[&10][0], Stmt::Gosub(100)));
        assert!(matches!(program[&110][0], Stmt::Return));
    }
}
