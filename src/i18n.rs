use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_INTRO: &str = "general.app_intro";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const FORM_HEADING: &str = "form.heading";
    pub const FORM_SITE_NAME: &str = "form.site_name";
    pub const FORM_VERIFIED: &str = "form.verified";
    pub const FORM_WARN_SITE_NAME: &str = "form.warn_site_name";
    pub const FORM_WARN_UNVERIFIED: &str = "form.warn_unverified";

    pub const FIELD_PARKING_SURFACE: &str = "field.parking_surface";
    pub const FIELD_SHADE_SURFACE: &str = "field.shade_surface";
    pub const FIELD_LAND_VALUE: &str = "field.land_value";
    pub const FIELD_INITIAL_COST: &str = "field.initial_cost";
    pub const FIELD_DURATION: &str = "field.duration";
    pub const FIELD_DISCOUNT_RATE: &str = "field.discount_rate";
    pub const FIELD_THRESHOLD: &str = "field.threshold";
    pub const FIELD_MAINTENANCE: &str = "field.maintenance";
    pub const FIELD_DECOMMISSIONING: &str = "field.decommissioning";
    pub const FIELD_PRODUCTION: &str = "field.production";
    pub const FIELD_PRICE: &str = "field.price";
    pub const FIELD_SUBSIDIES: &str = "field.subsidies";

    pub const HINT_DURATION: &str = "hint.duration";
    pub const HINT_DISCOUNT_RATE: &str = "hint.discount_rate";
    pub const HINT_THRESHOLD: &str = "hint.threshold";

    pub const REPORT_FIELD_PARKING_SURFACE: &str = "report_field.parking_surface";
    pub const REPORT_FIELD_SHADE_SURFACE: &str = "report_field.shade_surface";
    pub const REPORT_FIELD_LAND_VALUE: &str = "report_field.land_value";
    pub const REPORT_FIELD_INITIAL_COST: &str = "report_field.initial_cost";
    pub const REPORT_FIELD_DURATION: &str = "report_field.duration";
    pub const REPORT_FIELD_DISCOUNT_RATE: &str = "report_field.discount_rate";
    pub const REPORT_FIELD_THRESHOLD: &str = "report_field.threshold";
    pub const REPORT_FIELD_MAINTENANCE: &str = "report_field.maintenance";
    pub const REPORT_FIELD_DECOMMISSIONING: &str = "report_field.decommissioning";
    pub const REPORT_FIELD_PRODUCTION: &str = "report_field.production";
    pub const REPORT_FIELD_PRICE: &str = "report_field.price";
    pub const REPORT_FIELD_SUBSIDIES: &str = "report_field.subsidies";

    pub const RESULTS_HEADING: &str = "result.heading";
    pub const RESULT_REVENUE: &str = "result.revenue";
    pub const RESULT_COST: &str = "result.cost";
    pub const RESULT_CNA: &str = "result.cna";
    pub const RESULT_THRESHOLD: &str = "result.threshold";
    pub const RESULT_EXEMPT: &str = "result.exempt";
    pub const RESULT_ADVICE: &str = "result.advice";
    pub const YES: &str = "general.yes";
    pub const NO: &str = "general.no";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_SITE: &str = "report.site";
    pub const REPORT_INPUTS: &str = "report.inputs";
    pub const REPORT_RESULTS: &str = "report.results";
    pub const REPORT_METHODOLOGY: &str = "report.methodology";
    pub const REPORT_SAVED: &str = "report.saved";
    pub const REPORT_EXPORT: &str = "report.export";

    pub const PROMPT_SITE_NAME: &str = "prompt.site_name";
    pub const PROMPT_VALUE: &str = "prompt.value";
    pub const PROMPT_CONFIRM: &str = "prompt.confirm";
    pub const PROMPT_EXPORT_PDF: &str = "prompt.export_pdf";
    pub const PROMPT_PDF_PATH: &str = "prompt.pdf_path";
    pub const PROMPT_AGAIN: &str = "prompt.again";
    pub const CLI_CLAMPED: &str = "cli.clamped";
    pub const CLI_RANGE: &str = "cli.range";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Fr,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Fr
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(fr/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 fr로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 프랑스어 → 키 순으로 폴백한다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::En => en(key).or_else(|| fr(key)),
            Language::Fr => fr(key),
        };
        builtin.unwrap_or(key).to_string()
    }

    /// `{name}` 자리표시자를 채운 번역 문자열.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }

    /// 예/아니오 표시.
    pub fn yes_no(&self, value: bool) -> String {
        self.t(if value { keys::YES } else { keys::NO })
    }
}

/// 템플릿의 `{k}`를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "fr-fr".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("fr") => Some("fr-fr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "fr" => Some("fr-fr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., fr-fr)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., fr)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn fr(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Erreur",
        APP_TITLE => "Simulateur d'exonération d'ombrières photovoltaïques (CNA)",
        APP_INTRO => {
            "Ce simulateur évalue si un projet d'ombrière peut être exonéré pour non-viabilité \
             économique (loi APER). Il calcule le Coût Net Actualisé (CNA) et le compare au seuil \
             d'exonération."
        }
        APP_EXIT => "Fin du programme.",
        FORM_HEADING => "Paramètres à renseigner",
        FORM_SITE_NAME => "Nom du site",
        FORM_VERIFIED => "Donnée vérifiée",
        FORM_WARN_SITE_NAME => "Veuillez renseigner le nom du site pour continuer.",
        FORM_WARN_UNVERIFIED => {
            "Veuillez cocher toutes les cases 'Donnée vérifiée' pour afficher les résultats."
        }
        FIELD_PARKING_SURFACE => "Surface du parking (m²)",
        FIELD_SHADE_SURFACE => "Surface à couvrir par l'ombrière (m²)",
        FIELD_LAND_VALUE => "Valeur vénale du parking (€)",
        FIELD_INITIAL_COST => "Coût initial (CAPEX) du projet (€)",
        FIELD_DURATION => "Durée d'étude (ans)",
        FIELD_DISCOUNT_RATE => "Taux d'actualisation (%)",
        FIELD_THRESHOLD => "Seuil d'exonération (%)",
        FIELD_MAINTENANCE => "Coûts de maintenance annuels (€)",
        FIELD_DECOMMISSIONING => "Coût total de démantèlement/recyclage (€)",
        FIELD_PRODUCTION => "Production annuelle estimée (kWh)",
        FIELD_PRICE => "Prix de vente ou autoconsommation du kWh (€)",
        FIELD_SUBSIDIES => "Montant total des aides ou subventions (€)",
        HINT_DURATION => "Durée standard recommandée : 20 ans",
        HINT_DISCOUNT_RATE => "Taux recommandé : entre 4 % et 6 %",
        HINT_THRESHOLD => "Seuil légal selon l'article R*111-24 du code de l'urbanisme",
        REPORT_FIELD_PARKING_SURFACE => "Surface du parking (m²)",
        REPORT_FIELD_SHADE_SURFACE => "Surface de l'ombrière (m²)",
        REPORT_FIELD_LAND_VALUE => "Valeur vénale du parking (€)",
        REPORT_FIELD_INITIAL_COST => "Coût initial (€)",
        REPORT_FIELD_DURATION => "Durée d'étude (ans)",
        REPORT_FIELD_DISCOUNT_RATE => "Taux d'actualisation (%)",
        REPORT_FIELD_THRESHOLD => "Seuil d'exonération (%)",
        REPORT_FIELD_MAINTENANCE => "Maintenance annuelle (€)",
        REPORT_FIELD_DECOMMISSIONING => "Coût recyclage (€)",
        REPORT_FIELD_PRODUCTION => "Production annuelle (kWh)",
        REPORT_FIELD_PRICE => "Prix kWh (€)",
        REPORT_FIELD_SUBSIDIES => "Montant des aides (€)",
        RESULTS_HEADING => "Résultats",
        RESULT_REVENUE => "Revenus actualisés (€)",
        RESULT_COST => "Coûts actualisés (€)",
        RESULT_CNA => "Coût Net Actualisé (CNA) (€)",
        RESULT_THRESHOLD => "Seuil d'exonération ({pct}%) (€)",
        RESULT_EXEMPT => "Exonération possible ?",
        RESULT_ADVICE => {
            "Conseil : si le CNA dépasse le seuil d'exonération, vous pouvez inclure ces résultats \
             dans votre dossier préfectoral pour justifier l'exemption."
        }
        YES => "OUI",
        NO => "NON",
        REPORT_TITLE => "Synthèse du projet - Simulateur d'exonération",
        REPORT_SITE => "Site : {site}",
        REPORT_INPUTS => "1. Données renseignées :",
        REPORT_RESULTS => "2. Résultats calculés :",
        REPORT_METHODOLOGY => "Méthodologie de calcul",
        REPORT_SAVED => "PDF enregistré : {path}",
        REPORT_EXPORT => "Télécharger le PDF",
        PROMPT_SITE_NAME => "Nom du site : ",
        PROMPT_VALUE => "{label} [{default}] : ",
        PROMPT_CONFIRM => "  Donnée vérifiée ? (o/n) : ",
        PROMPT_EXPORT_PDF => "Exporter le PDF ? (o/n) : ",
        PROMPT_PDF_PATH => "Chemin du PDF [{default}] : ",
        PROMPT_AGAIN => "Nouvelle simulation ? (o/n) : ",
        CLI_CLAMPED => "Valeur hors plage, ramenée à {value}.",
        CLI_RANGE => "  ({min} - {max}) {hint}",
        ERROR_INVALID_NUMBER => "Veuillez saisir un nombre.",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_TITLE => "Photovoltaic parking canopy exemption simulator (CNA)",
        APP_INTRO => {
            "This simulator checks whether a parking canopy project can be exempted for lack of \
             economic viability (APER law). It computes the net present cost (CNA) and compares it \
             to the exemption threshold."
        }
        APP_EXIT => "Exiting.",
        FORM_HEADING => "Parameters",
        FORM_SITE_NAME => "Site name",
        FORM_VERIFIED => "Value verified",
        FORM_WARN_SITE_NAME => "Please enter the site name to continue.",
        FORM_WARN_UNVERIFIED => "Please tick every 'Value verified' box to display the results.",
        FIELD_PARKING_SURFACE => "Parking surface (m²)",
        FIELD_SHADE_SURFACE => "Surface covered by the canopy (m²)",
        FIELD_LAND_VALUE => "Appraised value of the parking lot (€)",
        FIELD_INITIAL_COST => "Initial project cost (CAPEX) (€)",
        FIELD_DURATION => "Study duration (years)",
        FIELD_DISCOUNT_RATE => "Discount rate (%)",
        FIELD_THRESHOLD => "Exemption threshold (%)",
        FIELD_MAINTENANCE => "Annual maintenance costs (€)",
        FIELD_DECOMMISSIONING => "Total decommissioning/recycling cost (€)",
        FIELD_PRODUCTION => "Estimated annual production (kWh)",
        FIELD_PRICE => "Selling or self-consumption price per kWh (€)",
        FIELD_SUBSIDIES => "Total grants or subsidies (€)",
        HINT_DURATION => "Recommended standard duration: 20 years",
        HINT_DISCOUNT_RATE => "Recommended rate: between 4 % and 6 %",
        HINT_THRESHOLD => "Legal threshold per article R*111-24 of the French planning code",
        REPORT_FIELD_PARKING_SURFACE => "Parking surface (m²)",
        REPORT_FIELD_SHADE_SURFACE => "Canopy surface (m²)",
        REPORT_FIELD_LAND_VALUE => "Parking appraised value (€)",
        REPORT_FIELD_INITIAL_COST => "Initial cost (€)",
        REPORT_FIELD_DURATION => "Study duration (years)",
        REPORT_FIELD_DISCOUNT_RATE => "Discount rate (%)",
        REPORT_FIELD_THRESHOLD => "Exemption threshold (%)",
        REPORT_FIELD_MAINTENANCE => "Annual maintenance (€)",
        REPORT_FIELD_DECOMMISSIONING => "Recycling cost (€)",
        REPORT_FIELD_PRODUCTION => "Annual production (kWh)",
        REPORT_FIELD_PRICE => "Price per kWh (€)",
        REPORT_FIELD_SUBSIDIES => "Subsidies (€)",
        RESULTS_HEADING => "Results",
        RESULT_REVENUE => "Discounted revenue (€)",
        RESULT_COST => "Discounted cost (€)",
        RESULT_CNA => "Net present cost (CNA) (€)",
        RESULT_THRESHOLD => "Exemption threshold ({pct}%) (€)",
        RESULT_EXEMPT => "Exemption possible?",
        RESULT_ADVICE => {
            "Tip: if the CNA exceeds the exemption threshold, these results can be attached to the \
             prefecture file to justify the exemption."
        }
        YES => "YES",
        NO => "NO",
        REPORT_TITLE => "Project summary - Exemption simulator",
        REPORT_SITE => "Site: {site}",
        REPORT_INPUTS => "1. Input data:",
        REPORT_RESULTS => "2. Computed results:",
        REPORT_METHODOLOGY => "Calculation methodology",
        REPORT_SAVED => "PDF saved: {path}",
        REPORT_EXPORT => "Download PDF",
        PROMPT_SITE_NAME => "Site name: ",
        PROMPT_VALUE => "{label} [{default}]: ",
        PROMPT_CONFIRM => "  Value verified? (y/n): ",
        PROMPT_EXPORT_PDF => "Export PDF? (y/n): ",
        PROMPT_PDF_PATH => "PDF path [{default}]: ",
        PROMPT_AGAIN => "Run another simulation? (y/n): ",
        CLI_CLAMPED => "Value out of range, clamped to {value}.",
        CLI_RANGE => "  ({min} - {max}) {hint}",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_falls_back_to_french() {
        let tr = Translator::new("ko-kr");
        assert_eq!(tr.language(), Language::Fr);
        assert_eq!(tr.t(keys::YES), "OUI");
    }

    #[test]
    fn english_strings_and_templates() {
        let tr = Translator::new("en-us");
        assert_eq!(tr.yes_no(false), "NO");
        assert_eq!(
            tr.tf(keys::RESULT_THRESHOLD, &[("pct", "10".into())]),
            "Exemption threshold (10%) (€)"
        );
    }

    #[test]
    fn missing_key_returns_key() {
        let tr = Translator::new("fr");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn explicit_language_wins_over_config() {
        assert_eq!(resolve_language("EN", Some("fr")), "en-us");
        assert_eq!(resolve_language("auto", Some("fr_FR")), "fr-fr");
    }

    #[test]
    fn nested_pack_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[result]\nexempt = \"Exonéré ?\"\n").expect("pack");
        assert_eq!(map.get("result.exempt").map(String::as_str), Some("Exonéré ?"));
    }
}
