use std::collections::HashMap;

// Simple in-memory translations
#[derive(Default)]
pub struct Translations {
    strings: HashMap<&'static str, &'static str>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: &'static str) {
        self.strings.insert(key, value);
    }

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.strings.get(key).copied()
    }
}

pub struct Localizations {
    translations: HashMap<&'static str, Translations>,
    current_lang: String,
}

impl Localizations {
    pub fn new() -> Self {
        let mut translations = HashMap::new();

        // English translations
        let mut en = Translations::new();
        en.insert("app-title", "YouTube Downloader");
        en.insert("url-label", "Video URL:");
        en.insert("url-placeholder", "Enter video URL");
        en.insert("download-format", "Download as:");
        en.insert("format-mp4", "MP4 (Video)");
        en.insert("format-mp3", "MP3 (Audio only)");
        en.insert("download-button", "Start Download");
        en.insert("update-button", "Update yt-dlp");
        en.insert("open-folder-button", "Open folder");
        en.insert("status-ready", "Ready");
        en.insert("status-downloading", "Starting download...");
        en.insert("status-updating", "Updating yt-dlp...");
        en.insert("error-no-url", "Please enter a YouTube URL.");
        en.insert(
            "error-helper-missing",
            "yt-dlp binary is missing. Please update yt-dlp first.",
        );
        en.insert("error-title", "Error");
        en.insert("error-fetch-failed", "Failed to download yt-dlp:");
        en.insert("error-download-failed", "Download failed:");
        en.insert("warn-companion-title", "Missing Dependency");
        en.insert(
            "warn-companion-body",
            "FFmpeg is not installed or not in your system PATH.\n\n\
             Some video/audio conversions may fail without it.\n\n\
             You can download it from: https://ffmpeg.org/download.html",
        );
        translations.insert("en-US", en);

        // Spanish translations
        let mut es = Translations::new();
        es.insert("app-title", "Descargador de YouTube");
        es.insert("url-label", "URL del video:");
        es.insert("url-placeholder", "Ingrese la URL del video");
        es.insert("download-format", "Descargar como:");
        es.insert("format-mp4", "MP4 (Video)");
        es.insert("format-mp3", "MP3 (Solo audio)");
        es.insert("download-button", "Iniciar descarga");
        es.insert("update-button", "Actualizar yt-dlp");
        es.insert("open-folder-button", "Abrir carpeta");
        es.insert("status-ready", "Listo");
        es.insert("status-downloading", "Iniciando descarga...");
        es.insert("status-updating", "Actualizando yt-dlp...");
        es.insert("error-no-url", "Por favor ingrese una URL de YouTube.");
        es.insert(
            "error-helper-missing",
            "Falta el binario de yt-dlp. Actualice yt-dlp primero.",
        );
        es.insert("error-title", "Error");
        es.insert("error-fetch-failed", "Error al descargar yt-dlp:");
        es.insert("error-download-failed", "La descarga falló:");
        es.insert("warn-companion-title", "Dependencia faltante");
        es.insert(
            "warn-companion-body",
            "FFmpeg no está instalado o no está en el PATH del sistema.\n\n\
             Algunas conversiones de video/audio pueden fallar sin él.\n\n\
             Puede descargarlo desde: https://ffmpeg.org/download.html",
        );
        translations.insert("es-ES", es);

        let mut localizer = Self {
            translations,
            current_lang: "en-US".to_string(),
        };

        // Try to pick up the system language, e.g. LANG=es_ES.UTF-8
        if let Ok(lang) = std::env::var("LANG") {
            let tag = lang.split('.').next().unwrap_or(&lang).replace('_', "-");
            let _ = localizer.select(&tag);
        }

        localizer
    }

    pub fn lookup_single_language(&self, key: &str, _args: Option<&()>) -> Option<String> {
        self.translations
            .get(self.current_lang.as_str())
            .and_then(|t| t.lookup(key))
            .map(|s| s.to_string())
            .or_else(|| {
                // Fallback to English if the current language doesn't have the key
                if self.current_lang != "en-US" {
                    self.translations
                        .get("en-US")
                        .and_then(|t| t.lookup(key))
                        .map(|s| s.to_string())
                } else {
                    None
                }
            })
    }

    pub fn select(&mut self, lang: &str) -> Result<(), String> {
        // Try exact match first
        if self.translations.contains_key(lang) {
            self.current_lang = lang.to_string();
            return Ok(());
        }

        // Try language code only
        let lang_part = lang.split('-').next().unwrap_or(lang);
        for &key in self.translations.keys() {
            if key.starts_with(lang_part) {
                self.current_lang = key.to_string();
                return Ok(());
            }
        }

        // Fallback to English
        self.current_lang = "en-US".to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_english_for_missing_keys() {
        let mut localizer = Localizations::new();
        localizer.select("fr-FR").unwrap();
        assert_eq!(
            localizer.lookup_single_language("status-ready", None),
            Some("Ready".to_string())
        );
    }

    #[test]
    fn selects_language_by_code_prefix() {
        let mut localizer = Localizations::new();
        localizer.select("es").unwrap();
        assert_eq!(
            localizer.lookup_single_language("status-ready", None),
            Some("Listo".to_string())
        );
    }
}
