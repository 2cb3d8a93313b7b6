/// 통화 표시: 천 단위 `,` 구분, 소수 둘째 자리. 음수 부호는 유지한다.
///
/// `1234567.891` → `1,234,567.89`, `-1234.5` → `-1,234.50`
pub fn format_currency(value: f64) -> String {
    group_thousands(value, 2)
}

/// 일반 수치 표시: 천 단위 구분, 지정 소수 자리.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    // -0.00 처럼 반올림 후 0이 되는 값에는 부호를 붙이지 않는다.
    let is_zero = formatted.bytes().all(|b| b == b'0' || b == b'.');
    if value.is_sign_negative() && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// 면제 기준 비율 라벨 (소수 없이).
pub fn format_percent_label(percent: f64) -> String {
    format!("{percent:.0}")
}

/// PDF 기본 폰트에서 깨지는 문자를 치환한다.
pub fn pdf_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '’' | '‘' => out.push('\''),
            '–' | '—' => out.push('-'),
            '€' => out.push_str("EUR"),
            'Σ' => out.push_str("Somme"),
            '×' => out.push('x'),
            '²' => out.push('2'),
            'à' | 'â' | 'ä' => out.push('a'),
            'é' | 'è' | 'ê' | 'ë' => out.push('e'),
            'î' | 'ï' => out.push('i'),
            'ô' | 'ö' => out.push('o'),
            'ù' | 'û' | 'ü' => out.push('u'),
            'ç' => out.push('c'),
            'É' | 'È' | 'Ê' => out.push('E'),
            'À' | 'Â' => out.push('A'),
            'Ç' => out.push('C'),
            c if c.is_ascii() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(999.999), "1,000.00");
        assert_eq!(format_currency(1_234_567.891), "1,234,567.89");
        assert_eq!(format_currency(30_000.0), "30,000.00");
        assert_eq!(format_currency(-1234.5), "-1,234.50");
        assert_eq!(format_currency(-0.001), "0.00");
    }

    #[test]
    fn percent_label_has_no_decimals() {
        assert_eq!(format_percent_label(10.0), "10");
        assert_eq!(format_percent_label(12.4), "12");
    }

    #[test]
    fn pdf_safe_folds_symbols_and_accents() {
        assert_eq!(pdf_safe("Coût initial (€)"), "Cout initial (EUR)");
        assert_eq!(pdf_safe("Durée d’étude – Σ"), "Duree d'etude - Somme");
        assert_eq!(pdf_safe("m²"), "m2");
    }
}
