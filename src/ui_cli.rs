use std::io::{self, Write};

use crate::form::{format_outputs, FormError};
use crate::i18n::Translator;
use crate::resolver::{Calculation, KnownProperty};

/// 시작 안내를 출력한다.
pub fn print_heading(tr: &Translator) {
    println!("{}", tr.t("cli.heading"));
    println!("{}", tr.t("cli.hint"));
}

/// 네 입력 칸을 차례로 묻는다. 'q'를 입력하거나 입력이 끝나면 None.
pub fn read_fields(tr: &Translator) -> io::Result<Option<Vec<(KnownProperty, String)>>> {
    println!();
    let mut fields = Vec::with_capacity(KnownProperty::ALL.len());
    for property in KnownProperty::ALL {
        let prompt = format!(
            "{}{}",
            tr.text(property.i18n_key(), property.label()),
            tr.text("cli.prompt_suffix", ": ")
        );
        let Some(line) = read_line(&prompt)? else {
            return Ok(None);
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        fields.push((property, line.to_string()));
    }
    Ok(Some(fields))
}

/// 계산 결과 일곱 칸과 공정을 출력한다.
pub fn print_calculation(tr: &Translator, calc: &Calculation) {
    for (field, value) in format_outputs(&calc.state) {
        println!("  {:<52} {value:>10}", tr.text(field.i18n_key(), field.label()));
    }
    println!(
        "  {}: {}",
        tr.text("process.label", "Process"),
        tr.text(calc.process.i18n_key(), calc.process.label())
    );
}

/// 검증/계산 오류를 출력한다. 세션은 바뀌지 않았으므로 다시 입력받는다.
pub fn print_error(tr: &Translator, err: &FormError) {
    println!("{}: {}", tr.text("general.error_prefix", "Error"), err.message(tr));
}

/// 한 줄을 읽는다. EOF 이면 None.
fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}
