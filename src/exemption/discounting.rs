/// (1 + r)^year 복리 계수. `rate`는 소수(0.05 = 5%)이다.
pub fn compound_factor(rate: f64, year: u32) -> f64 {
    (1.0 + rate).powf(f64::from(year))
}

/// `year`년 뒤 현금흐름에 곱할 할인 계수 1 / (1 + r)^year.
///
/// r = 0이면 모든 연도에서 1.0이 된다.
pub fn discount_factor(rate: f64, year: u32) -> f64 {
    1.0 / compound_factor(rate, year)
}

/// 1..=years 각 연말에 동일 금액이 발생할 때의 현재가치 합계.
///
/// 빈 범위(years = 0)는 0.0으로 접힌다.
pub fn present_value_of_constant_stream(amount: f64, rate: f64, years: u32) -> f64 {
    (1..=years).fold(0.0, |acc, year| acc + amount / compound_factor(rate, year))
}
