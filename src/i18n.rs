//! Locales and UI text lookup.
//!
//! The active locale is held by a [`LocaleContext`] owned by the app and
//! handed to every draw function; [`LocaleContext::set`] is the only way to
//! change it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{ParamError, ValidationError};

/// Supported UI locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
    Uz,
}

static ALL_LOCALES: &[Locale] = &[Locale::En, Locale::Ru, Locale::Uz];

impl Locale {
    /// Returns the locale code (`en`, `ru`, `uz`).
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
            Locale::Uz => "uz",
        }
    }

    /// Returns the locale's own name for itself.
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ru => "Русский",
            Locale::Uz => "Oʻzbekcha",
        }
    }

    /// Returns the flag glyph shown next to the name.
    pub fn flag(&self) -> &'static str {
        match self {
            Locale::En => "🇬🇧",
            Locale::Ru => "🇷🇺",
            Locale::Uz => "🇺🇿",
        }
    }

    /// Returns all locales in switcher order.
    pub fn all() -> &'static [Locale] {
        ALL_LOCALES
    }

    fn column(self) -> usize {
        match self {
            Locale::En => 0,
            Locale::Ru => 1,
            Locale::Uz => 2,
        }
    }
}

/// Error returned when parsing an unsupported locale code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    /// Accepts a bare code or a language tag such as `ru-RU`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s.trim().split(['-', '_']).next().unwrap_or_default();
        ALL_LOCALES
            .iter()
            .copied()
            .find(|l| l.code().eq_ignore_ascii_case(lang))
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

#[mutants::skip]
impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The active locale for one app instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocaleContext {
    active: Locale,
}

impl LocaleContext {
    pub fn new(active: Locale) -> Self {
        Self { active }
    }

    /// Returns the active locale.
    pub fn locale(&self) -> Locale {
        self.active
    }

    /// Switches the active locale. Returns `true` if it changed.
    pub fn set(&mut self, locale: Locale) -> bool {
        let changed = self.active != locale;
        self.active = locale;
        changed
    }

    /// Looks up `text` in the active locale.
    pub fn tr(&self, text: Text) -> &'static str {
        tr(self.active, text)
    }
}

/// UI strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Text {
    AppTitle,
    StopReasonTitle,
    StopReasonPrompt,
    TripLabel,
    ReasonRest,
    ReasonPersonal,
    ReasonBreakdown,
    QuestionnaireTitle,
    ReasonTypeLabel,
    ReasonTypeWork,
    ReasonTypePersonal,
    FieldReason,
    FieldDestination,
    FieldLatitude,
    FieldLongitude,
    FieldFrom,
    FieldTo,
    RouteEntryTitle,
    RouteOverviewTitle,
    RouteEmpty,
    ConfirmFinishRoute,
    ConfirmDiscardRoute,
    LanguageTitle,
    GalleryTitle,
    GalleryEmpty,
    ViewerZoom,
    ViewerOffset,
    Sending,
    StopReasonSaved,
    QuestionnaireSaved,
    RouteSaved,
    RecordedAt,
    MissingParamsTitle,
    MissingParamsHint,
    ClosingSoon,
    SubmitFailed,
    NetworkError,
    ErrRequired,
    ErrSelectReason,
    ErrUnknownValue,
    ErrNotANumber,
    ErrLatitudeRange,
    ErrLongitudeRange,
    ErrMissingParam,
    ErrMalformedParam,
    FooterStopReason,
    FooterQuestionnaire,
    FooterRouteEntry,
    FooterRouteOverview,
    FooterLanguage,
    FooterGallery,
    FooterViewer,
    FooterConfirm,
    FooterDone,
}

/// Looks up `text` for `locale`.
pub fn tr(locale: Locale, text: Text) -> &'static str {
    entry(text)[locale.column()]
}

/// `[en, ru, uz]` for each string.
fn entry(text: Text) -> [&'static str; 3] {
    match text {
        Text::AppTitle => ["Trip forms", "Формы поездки", "Safar shakllari"],
        Text::StopReasonTitle => ["Stop reason", "Причина остановки", "Toʻxtash sababi"],
        Text::StopReasonPrompt => [
            "Why did you stop?",
            "Почему вы остановились?",
            "Nega toʻxtadingiz?",
        ],
        Text::TripLabel => ["Trip", "Поездка", "Safar"],
        Text::ReasonRest => ["Rest", "Отдых", "Dam olish"],
        Text::ReasonPersonal => ["Personal", "Личное", "Shaxsiy"],
        Text::ReasonBreakdown => ["Breakdown", "Поломка", "Nosozlik"],
        Text::QuestionnaireTitle => [
            "Trip confirmation",
            "Подтверждение поездки",
            "Safarni tasdiqlash",
        ],
        Text::ReasonTypeLabel => ["Trip type", "Тип поездки", "Safar turi"],
        Text::ReasonTypeWork => ["Work", "Рабочая", "Ish"],
        Text::ReasonTypePersonal => ["Personal", "Личная", "Shaxsiy"],
        Text::FieldReason => ["Reason", "Причина", "Sabab"],
        Text::FieldDestination => ["Destination", "Пункт назначения", "Manzil"],
        Text::FieldLatitude => ["Latitude", "Широта", "Kenglik"],
        Text::FieldLongitude => ["Longitude", "Долгота", "Uzunlik"],
        Text::FieldFrom => ["From", "Откуда", "Qayerdan"],
        Text::FieldTo => ["To", "Куда", "Qayerga"],
        Text::RouteEntryTitle => [
            "Add route point",
            "Добавить точку маршрута",
            "Marshrut nuqtasini qoʻshish",
        ],
        Text::RouteOverviewTitle => ["Route", "Маршрут", "Marshrut"],
        Text::RouteEmpty => [
            "No route points yet.",
            "Точек маршрута пока нет.",
            "Hali marshrut nuqtalari yoʻq.",
        ],
        Text::ConfirmFinishRoute => [
            "Finish this route?",
            "Завершить маршрут?",
            "Marshrutni yakunlaysizmi?",
        ],
        Text::ConfirmDiscardRoute => [
            "Discard this route?",
            "Отменить маршрут?",
            "Marshrutni bekor qilasizmi?",
        ],
        Text::LanguageTitle => ["Language", "Язык", "Til"],
        Text::GalleryTitle => ["Guide", "Инструкция", "Qoʻllanma"],
        Text::GalleryEmpty => [
            "No images configured.",
            "Изображения не настроены.",
            "Rasmlar sozlanmagan.",
        ],
        Text::ViewerZoom => ["Zoom", "Масштаб", "Masshtab"],
        Text::ViewerOffset => ["Offset", "Смещение", "Siljish"],
        Text::Sending => ["Sending…", "Отправка…", "Yuborilmoqda…"],
        Text::StopReasonSaved => [
            "Stop reason saved",
            "Причина остановки сохранена",
            "Toʻxtash sababi saqlandi",
        ],
        Text::QuestionnaireSaved => ["Answer saved", "Ответ сохранён", "Javob saqlandi"],
        Text::RouteSaved => ["Route saved", "Маршрут сохранён", "Marshrut saqlandi"],
        Text::RecordedAt => ["Recorded at", "Записано", "Qayd etildi"],
        Text::MissingParamsTitle => [
            "This link is incomplete",
            "Ссылка неполная",
            "Havola toʻliq emas",
        ],
        Text::MissingParamsHint => [
            "Open the form again from the bot message.",
            "Откройте форму заново из сообщения бота.",
            "Shaklni bot xabaridan qayta oching.",
        ],
        Text::ClosingSoon => [
            "This window will close shortly.",
            "Окно скоро закроется.",
            "Oyna tez orada yopiladi.",
        ],
        Text::SubmitFailed => [
            "Submission failed. Please try again.",
            "Не удалось отправить. Попробуйте ещё раз.",
            "Yuborib boʻlmadi. Qaytadan urinib koʻring.",
        ],
        Text::NetworkError => [
            "Network error. Please check your connection.",
            "Ошибка сети. Проверьте подключение.",
            "Tarmoq xatosi. Ulanishni tekshiring.",
        ],
        Text::ErrRequired => [
            "This field is required",
            "Обязательное поле",
            "Majburiy maydon",
        ],
        Text::ErrSelectReason => ["Select a reason", "Выберите причину", "Sababni tanlang"],
        Text::ErrUnknownValue => ["Unknown value", "Неизвестное значение", "Nomaʼlum qiymat"],
        Text::ErrNotANumber => ["Enter a number", "Введите число", "Raqam kiriting"],
        Text::ErrLatitudeRange => [
            "Latitude must be between -90 and 90",
            "Широта должна быть от -90 до 90",
            "Kenglik -90 va 90 oraligʻida boʻlishi kerak",
        ],
        Text::ErrLongitudeRange => [
            "Longitude must be between -180 and 180",
            "Долгота должна быть от -180 до 180",
            "Uzunlik -180 va 180 oraligʻida boʻlishi kerak",
        ],
        Text::ErrMissingParam => [
            "Missing parameter",
            "Не указан параметр",
            "Parametr koʻrsatilmagan",
        ],
        Text::ErrMalformedParam => [
            "Invalid parameter",
            "Неверный параметр",
            "Notoʻgʻri parametr",
        ],
        Text::FooterStopReason => [
            "↑/↓: choose  Enter: send  Esc: close",
            "↑/↓: выбор  Enter: отправить  Esc: закрыть",
            "↑/↓: tanlash  Enter: yuborish  Esc: yopish",
        ],
        Text::FooterQuestionnaire => [
            "Tab/Shift+Tab: next/prev  ←/→: trip type  Enter: send  Esc: close",
            "Tab/Shift+Tab: след./пред.  ←/→: тип  Enter: отправить  Esc: закрыть",
            "Tab/Shift+Tab: keyingi/oldingi  ←/→: tur  Enter: yuborish  Esc: yopish",
        ],
        Text::FooterRouteEntry => [
            "Tab: next field  Enter: add  Esc: back",
            "Tab: след. поле  Enter: добавить  Esc: назад",
            "Tab: keyingi maydon  Enter: qoʻshish  Esc: orqaga",
        ],
        Text::FooterRouteOverview => [
            "a: add point  Backspace: remove last  Enter: finish  Esc: discard",
            "a: добавить  Backspace: удалить последнюю  Enter: завершить  Esc: отменить",
            "a: qoʻshish  Backspace: oxirgisini oʻchirish  Enter: yakunlash  Esc: bekor qilish",
        ],
        Text::FooterLanguage => [
            "↑/↓: choose  Enter: apply  Esc: back",
            "↑/↓: выбор  Enter: применить  Esc: назад",
            "↑/↓: tanlash  Enter: qoʻllash  Esc: orqaga",
        ],
        Text::FooterGallery => [
            "↑/↓: choose  Enter: open  Esc: back",
            "↑/↓: выбор  Enter: открыть  Esc: назад",
            "↑/↓: tanlash  Enter: ochish  Esc: orqaga",
        ],
        Text::FooterViewer => [
            "+/-: zoom  arrows/drag: pan  0: reset  Esc: close",
            "+/-: масштаб  стрелки/перетаскивание: сдвиг  0: сброс  Esc: закрыть",
            "+/-: masshtab  strelkalar/sudrash: siljitish  0: tiklash  Esc: yopish",
        ],
        Text::FooterConfirm => ["y: yes  n: no", "y: да  n: нет", "y: ha  n: yoʻq"],
        Text::FooterDone => ["q: close", "q: закрыть", "q: yopish"],
    }
}

/// Localized message for an inline field error.
pub fn validation_message(locale: Locale, error: &ValidationError) -> String {
    match error {
        ValidationError::Blank => tr(locale, Text::ErrRequired).to_string(),
        ValidationError::NoReasonSelected => tr(locale, Text::ErrSelectReason).to_string(),
        ValidationError::UnknownStopReason(value) | ValidationError::UnknownReasonType(value) => {
            format!("{}: {value}", tr(locale, Text::ErrUnknownValue))
        }
        ValidationError::NotANumber(_) => tr(locale, Text::ErrNotANumber).to_string(),
        ValidationError::LatitudeOutOfRange(_) => tr(locale, Text::ErrLatitudeRange).to_string(),
        ValidationError::LongitudeOutOfRange(_) => tr(locale, Text::ErrLongitudeRange).to_string(),
    }
}

/// Localized message for a missing or malformed entry parameter.
pub fn param_message(locale: Locale, error: &ParamError) -> String {
    match error {
        ParamError::Missing(name) => format!("{}: {name}", tr(locale, Text::ErrMissingParam)),
        ParamError::Malformed { name, value } => {
            format!("{}: {name}={value}", tr(locale, Text::ErrMalformedParam))
        }
    }
}
