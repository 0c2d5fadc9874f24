//! Declarative pipeline grammar over [`Token`]s

use crate::core::{
    Agent, EnvValue, EnvironmentEntry, PipelineEntry, PipelineModel, PostCondition, Stage, StageEntry, Step,
    StepArg, UnsupportedBlock, Value, When,
};
use crate::parser::lexer::Token;
use chumsky::error::Error as _;
use chumsky::prelude::*;
use chumsky::Stream;
use std::ops::Range;

type ParserError = Simple<Token>;

const PIPELINE_DIRECTIVES: &[&str] = &["agent", "environment", "stages", "post"];
const STAGE_DIRECTIVES: &[&str] = &["agent", "environment", "steps", "post", "when"];

/// Parse a token stream into a pipeline model
pub fn parse(tokens: Vec<(Token, Range<usize>)>, len: usize) -> Result<PipelineModel, Vec<ParserError>> {
    pipeline().parse(Stream::from_iter(len..len + 1, tokens.into_iter()))
}

fn keyword(word: &'static str) -> impl Parser<Token, (), Error = ParserError> + Clone {
    just(Token::Ident(word.to_string())).ignored()
}

fn ident() -> impl Parser<Token, String, Error = ParserError> + Clone {
    select! { Token::Ident(name) => name }
}

fn string() -> impl Parser<Token, String, Error = ParserError> + Clone {
    select! { Token::Str(s) => s }
}

fn raw() -> impl Parser<Token, String, Error = ParserError> + Clone {
    select! { Token::Raw(s) => s }
}

fn block<O>(
    inner: impl Parser<Token, O, Error = ParserError> + Clone,
) -> impl Parser<Token, O, Error = ParserError> + Clone {
    inner.delimited_by(just(Token::LBrace), just(Token::RBrace))
}

fn value() -> impl Parser<Token, Value, Error = ParserError> + Clone {
    filter_map(|span: Range<usize>, token| match token {
        Token::Str(s) => Ok(Value::String(s)),
        Token::Int(i) => Ok(Value::Int(i)),
        Token::Float(text) => text
            .parse()
            .map(Value::Float)
            .map_err(|_| Simple::custom(span, format!("invalid number {}", text))),
        Token::Ident(word) if word == "true" => Ok(Value::Bool(true)),
        Token::Ident(word) if word == "false" => Ok(Value::Bool(false)),
        other => Err(Simple::expected_input_found(span, None, Some(other))),
    })
}

/// `name args? rawBody? { steps }?`
fn step() -> impl Parser<Token, Step, Error = ParserError> + Clone {
    recursive(|step| {
        let arg = ident()
            .or(string())
            .then_ignore(just(Token::Colon))
            .then(value())
            .map(|(key, value)| StepArg::Named { key, value })
            .or(value().map(StepArg::Unnamed));

        let args = arg
            .clone()
            .separated_by(just(Token::Comma))
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .or(arg.separated_by(just(Token::Comma)).at_least(1));

        ident()
            .then(args.or_not())
            .then(raw().or_not())
            .then(block(step.repeated()).or_not())
            .map(|(((name, args), body), nested)| Step {
                name,
                args: args.unwrap_or_default(),
                body,
                nested: nested.unwrap_or_default(),
            })
    })
}

/// A run of directives that are not modeled, named anything but `reserved`
fn unsupported(
    reserved: &'static [&'static str],
) -> impl Parser<Token, Vec<UnsupportedBlock>, Error = ParserError> + Clone {
    step()
        .try_map(move |step, span| {
            if reserved.contains(&step.name.as_str()) {
                Err(Simple::custom(span, format!("malformed '{}' directive", step.name)))
            } else {
                Ok(UnsupportedBlock::from_step(&step))
            }
        })
        .repeated()
        .at_least(1)
}

fn agent() -> impl Parser<Token, Agent, Error = ParserError> + Clone {
    let body = block(ident().then(string().or(raw().map(|body| crate::preprocess::escape::to_curly(&body))).or_not()));
    let bare = ident().map(|kind| (kind, None));

    keyword("agent")
        .ignore_then(body.or(bare))
        .map(|(kind, label)| Agent { kind, label })
}

fn environment() -> impl Parser<Token, Vec<EnvironmentEntry>, Error = ParserError> + Clone {
    let credential = keyword("credentials")
        .ignore_then(string().delimited_by(just(Token::LParen), just(Token::RParen)))
        .map(EnvValue::Credential);
    let env_value = credential.or(string().map(EnvValue::Literal));

    let entry = ident()
        .then_ignore(just(Token::Equals))
        .then(env_value)
        .map(|(key, value)| EnvironmentEntry { key, value });

    keyword("environment").ignore_then(block(entry.repeated()))
}

fn post() -> impl Parser<Token, Vec<PostCondition>, Error = ParserError> + Clone {
    let condition = ident()
        .then(block(step().repeated()))
        .map(|(kind, steps)| PostCondition { kind, steps });

    keyword("post").ignore_then(block(condition.repeated()))
}

fn when() -> impl Parser<Token, When, Error = ParserError> + Clone {
    keyword("when")
        .ignore_then(block(step().repeated().at_least(1)))
        .map(|conditions| classify_when(&conditions))
}

fn classify_when(conditions: &[Step]) -> When {
    if let [only] = conditions {
        if only.name == "branch" && only.body.is_none() && only.nested.is_empty() {
            if let Some(Value::String(branch)) = only.single_unnamed_arg() {
                return When::Branch(crate::preprocess::escape::decode(branch));
            }
        }
    }

    let text = conditions.iter().map(Step::to_groovy).collect::<Vec<_>>().join("\n");
    let name = conditions.first().map(|s| s.name.clone()).unwrap_or_default();
    When::Unsupported(UnsupportedBlock { name, text })
}

fn stage() -> impl Parser<Token, Stage, Error = ParserError> + Clone {
    let entry = choice((
        agent().map(StageEntry::Agent),
        environment().map(StageEntry::Environment),
        keyword("steps")
            .ignore_then(block(step().repeated()))
            .map(StageEntry::Steps),
        post().map(StageEntry::Post),
        when().map(StageEntry::When),
        unsupported(STAGE_DIRECTIVES).map(StageEntry::Unsupported),
    ));

    keyword("stage")
        .ignore_then(string().delimited_by(just(Token::LParen), just(Token::RParen)))
        .then(block(entry.repeated()))
        .map(|(name, entries)| Stage::new(&name, entries))
        .boxed()
}

fn pipeline() -> impl Parser<Token, PipelineModel, Error = ParserError> {
    let stages = keyword("stages").ignore_then(block(stage().repeated()));

    let entry = choice((
        agent().map(PipelineEntry::Agent),
        environment().map(PipelineEntry::Environment),
        stages.map(PipelineEntry::Stages),
        post().map(PipelineEntry::Post),
        unsupported(PIPELINE_DIRECTIVES).map(PipelineEntry::Unsupported),
    ));

    keyword("pipeline")
        .ignore_then(block(entry.repeated()))
        .then_ignore(end())
        .map(PipelineModel::new)
}
