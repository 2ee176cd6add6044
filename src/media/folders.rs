use std::collections::BTreeMap;

/// Curated project name -> folder slug table for the site's portfolio
const CURATED: &[(&str, &str)] = &[
    ("Hospital del Cerro", "hospital-cerro"),
    ("Hospital El Filtro", "hospital-filtro"),
    ("Congreso de Intendentes", "congreso-intendentes"),
    ("Facultad de Enfermería UdelaR", "facultad-enfermeria"),
    ("Centro de Realojos Piedras Blancas", "realojos-piedrasblancas"),
    ("Círculo Católico - Policlínica", "circulo-catolico"),
    ("Cárcel de Libertad", "carcel-libertad"),
    ("The Garzón School (TGS)", "garzon-school"),
    ("Colegio Aldeas", "colegio-aldeas"),
    ("Vivo Life Cordón", "vivo-life"),
    ("Avita Libertador", "avita-libertador"),
    ("Uruguayan American School (UAS)", "uas"),
    ("Proa Carrasco", "proa-carrasco"),
    ("Sinergia Faro (ex Sheraton)", "sinergia-faro"),
    ("MIDES - Fachada Institucional", "mides"),
    ("Edificio Merville", "merville"),
    ("Summum - World Trade Center", "summum-wtc"),
    ("Hospital de Clínicas", "hospital-clinicas"),
    ("Hospital Pasteur", "hospital-pasteur"),
    ("ANTEL - Sede Cerrito", "antel-cerrito"),
    ("Ministerio de Trabajo y Seguridad Social (MTSS)", "mtss"),
    ("Banco de Seguros del Estado (BSE)", "bse"),
    ("Nostrum Malvín Torre 2", "nostrum-malvin"),
    ("Cooperativas de Vivienda", "cooperativas"),
    ("INISA Academia", "inisa"),
    ("Comisaría de Salinas", "comisaria-salinas"),
    ("Hogar Horneros (INISA)", "hogar-horneros"),
    ("Escuela Integral STILER", "stiler-escuela-integral"),
];

/// Maps a project's display name to the folder holding its media.
/// Projects without an entry keep whatever media the manifest already lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderMap {
    entries: BTreeMap<String, String>,
}

impl FolderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table
    pub fn curated() -> Self {
        let entries = CURATED
            .iter()
            .map(|(name, slug)| (name.to_string(), slug.to_string()))
            .collect();
        FolderMap { entries }
    }

    /// Add or replace entries (configuration overrides)
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Self {
        for (name, slug) in overrides {
            self.entries.insert(name.clone(), slug.clone());
        }
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, slug: impl Into<String>) {
        self.entries.insert(name.into(), slug.into());
    }

    pub fn slug_for(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
