//! Built-in "likely subtags": the locale a bare language code most often means.
//!
//! Consulted after configured overrides and the allow-list, so a site that
//! serves `en_GB` only never has `/en/` resolved to `en_US`.

const LIKELY_SUBTAGS: &[(&str, &str)] = &[
    ("af", "af_ZA"),
    ("am", "am_ET"),
    ("ar", "ar_EG"),
    ("az", "az_AZ"),
    ("be", "be_BY"),
    ("bg", "bg_BG"),
    ("bn", "bn_BD"),
    ("bs", "bs_BA"),
    ("ca", "ca_ES"),
    ("cs", "cs_CZ"),
    ("cy", "cy_GB"),
    ("da", "da_DK"),
    ("de", "de_DE"),
    ("el", "el_GR"),
    ("en", "en_US"),
    ("es", "es_ES"),
    ("et", "et_EE"),
    ("eu", "eu_ES"),
    ("fa", "fa_IR"),
    ("fi", "fi_FI"),
    ("fil", "fil_PH"),
    ("fo", "fo_FO"),
    ("fr", "fr_FR"),
    ("ga", "ga_IE"),
    ("gd", "gd_GB"),
    ("gl", "gl_ES"),
    ("he", "he_IL"),
    ("hi", "hi_IN"),
    ("hr", "hr_HR"),
    ("hu", "hu_HU"),
    ("hy", "hy_AM"),
    ("id", "id_ID"),
    ("is", "is_IS"),
    ("it", "it_IT"),
    ("ja", "ja_JP"),
    ("ka", "ka_GE"),
    ("kk", "kk_KZ"),
    ("km", "km_KH"),
    ("ko", "ko_KR"),
    ("lt", "lt_LT"),
    ("lv", "lv_LV"),
    ("mi", "mi_NZ"),
    ("mk", "mk_MK"),
    ("ms", "ms_MY"),
    ("mt", "mt_MT"),
    ("nb", "nb_NO"),
    ("ne", "ne_NP"),
    ("nl", "nl_NL"),
    ("nn", "nn_NO"),
    ("pl", "pl_PL"),
    ("pt", "pt_BR"),
    ("ro", "ro_RO"),
    ("ru", "ru_RU"),
    ("si", "si_LK"),
    ("sk", "sk_SK"),
    ("sl", "sl_SI"),
    ("sq", "sq_AL"),
    ("sr", "sr_RS"),
    ("sv", "sv_SE"),
    ("sw", "sw_TZ"),
    ("ta", "ta_IN"),
    ("th", "th_TH"),
    ("tr", "tr_TR"),
    ("uk", "uk_UA"),
    ("ur", "ur_PK"),
    ("uz", "uz_UZ"),
    ("vi", "vi_VN"),
    ("zh", "zh_CN"),
];

/// Look up the most likely locale for a bare language code.
pub fn likely_locale(lang: &str) -> Option<&'static str> {
    LIKELY_SUBTAGS
        .iter()
        .find(|(code, _)| *code == lang)
        .map(|(_, locale)| *locale)
}
