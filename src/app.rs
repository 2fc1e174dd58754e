use std::io;

use thiserror::Error;
use tracing::info;

use crate::chart::{ChartRenderer, ReferenceCurves, TextChartRenderer};
use crate::config::{Config, ConfigError};
use crate::form::{self, FormError};
use crate::i18n::Translator;
use crate::psychro::{AshraeSolver, PsychrometricSolver};
use crate::resolver::{Calculation, InputResolver, KnownProperties, KnownProperty};
use crate::session::Session;
use crate::ui_cli;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Form(#[from] FormError),
}

/// 폼 문자열을 해석해 계산하고, 성공하면 세션에 점을 추가한다.
pub fn submit_form<'a, S, I>(
    resolver: &InputResolver<S>,
    session: &mut Session,
    fields: I,
) -> Result<Calculation, FormError>
where
    S: PsychrometricSolver,
    I: IntoIterator<Item = (KnownProperty, &'a str)>,
{
    let props = form::parse_fields(fields)?;
    Ok(resolver.submit(session, &props)?)
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &Config, tr: &Translator) -> Result<(), AppError> {
    let resolver = InputResolver::at_elevation(AshraeSolver, config.elevation_ft);
    let curves = ReferenceCurves::compute(&config.chart, resolver.pressure_psi());
    let mut session = Session::new();
    let mut renderer = TextChartRenderer::new(io::stdout());
    info!(pressure_psi = resolver.pressure_psi(), "cli session started");

    ui_cli::print_heading(tr);
    while let Some(fields) = ui_cli::read_fields(tr)? {
        let submitted = fields.iter().map(|(k, s)| (*k, s.as_str()));
        match submit_form(&resolver, &mut session, submitted) {
            Ok(calc) => {
                ui_cli::print_calculation(tr, &calc);
                renderer.render(&curves, session.history(), session.latest())?;
            }
            Err(err) => ui_cli::print_error(tr, &err),
        }
    }
    println!("{}", tr.t("general.app_exit"));
    Ok(())
}

/// 한 번만 계산하고 결과를 출력한다 (`calc` 하위 명령).
pub fn calculate_once(config: &Config, tr: &Translator, props: &KnownProperties) -> Result<(), AppError> {
    let resolver = InputResolver::at_elevation(AshraeSolver, config.elevation_ft);
    let mut session = Session::new();
    let calc = resolver.submit(&mut session, props).map_err(FormError::from)?;
    ui_cli::print_calculation(tr, &calc);
    Ok(())
}
