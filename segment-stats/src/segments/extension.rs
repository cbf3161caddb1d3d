//! Descriptions for the files a segment is made of.

/// Resolves a file-size key (an extension, or a bare file name) to a
/// human description.
pub trait DescriptionLookup {
    fn lookup(&self, extension: &str) -> Option<&str>;
}

impl<F> DescriptionLookup for F
where
    F: Fn(&str) -> Option<&'static str>,
{
    fn lookup(&self, extension: &str) -> Option<&str> {
        self(extension)
    }
}

/// Description rendered for keys the lookup does not know.
pub const OTHERS: &str = "Others";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LuceneFileExtension {
    Cfe,
    Cfs,
    Cmp,
    Dii,
    Dim,
    Doc,
    Dvd,
    Dvm,
    Fdm,
    Fdt,
    Fdx,
    Fnm,
    Kdd,
    Kdi,
    Kdm,
    Liv,
    Lkp,
    Nvd,
    Nvm,
    Pay,
    Pos,
    Si,
    Tim,
    Tip,
    Tmd,
    Tvd,
    Tvm,
    Tvx,
    Vec,
    Vem,
    Vex,
}

impl LuceneFileExtension {
    pub const ALL: [LuceneFileExtension; 31] = [
        Self::Cfe,
        Self::Cfs,
        Self::Cmp,
        Self::Dii,
        Self::Dim,
        Self::Doc,
        Self::Dvd,
        Self::Dvm,
        Self::Fdm,
        Self::Fdt,
        Self::Fdx,
        Self::Fnm,
        Self::Kdd,
        Self::Kdi,
        Self::Kdm,
        Self::Liv,
        Self::Lkp,
        Self::Nvd,
        Self::Nvm,
        Self::Pay,
        Self::Pos,
        Self::Si,
        Self::Tim,
        Self::Tip,
        Self::Tmd,
        Self::Tvd,
        Self::Tvm,
        Self::Tvx,
        Self::Vec,
        Self::Vem,
        Self::Vex,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Cfe => "cfe",
            Self::Cfs => "cfs",
            Self::Cmp => "cmp",
            Self::Dii => "dii",
            Self::Dim => "dim",
            Self::Doc => "doc",
            Self::Dvd => "dvd",
            Self::Dvm => "dvm",
            Self::Fdm => "fdm",
            Self::Fdt => "fdt",
            Self::Fdx => "fdx",
            Self::Fnm => "fnm",
            Self::Kdd => "kdd",
            Self::Kdi => "kdi",
            Self::Kdm => "kdm",
            Self::Liv => "liv",
            Self::Lkp => "lkp",
            Self::Nvd => "nvd",
            Self::Nvm => "nvm",
            Self::Pay => "pay",
            Self::Pos => "pos",
            Self::Si => "si",
            Self::Tim => "tim",
            Self::Tip => "tip",
            Self::Tmd => "tmd",
            Self::Tvd => "tvd",
            Self::Tvm => "tvm",
            Self::Tvx => "tvx",
            Self::Vec => "vec",
            Self::Vem => "vem",
            Self::Vex => "vex",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Cfe => "Compound Files Entries",
            Self::Cfs => "Compound Files",
            Self::Cmp => "Completion Index",
            Self::Dii => "Points",
            Self::Dim => "Points",
            Self::Doc => "Frequencies",
            Self::Dvd => "DocValues",
            Self::Dvm => "DocValues",
            Self::Fdm => "Field Metadata",
            Self::Fdt => "Field Data",
            Self::Fdx => "Field Index",
            Self::Fnm => "Fields",
            Self::Kdd => "Points",
            Self::Kdi => "Points",
            Self::Kdm => "Points",
            Self::Liv => "Live Documents",
            Self::Lkp => "Completion Dictionary",
            Self::Nvd => "Norms",
            Self::Nvm => "Norms",
            Self::Pay => "Payloads",
            Self::Pos => "Positions",
            Self::Si => "Segment Info",
            Self::Tim => "Term Dictionary",
            Self::Tip => "Term Index",
            Self::Tmd => "Term Dictionary Metadata",
            Self::Tvd => "Term Vector Documents",
            Self::Tvm => "Term Vector Metadata",
            Self::Tvx => "Term Vector Index",
            Self::Vec => "Vector Data",
            Self::Vem => "Vector Metadata",
            Self::Vex => "Vector Index",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.extension() == extension)
    }
}

/// Lookup over the standard segment file extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LuceneFileExtensions;

impl DescriptionLookup for LuceneFileExtensions {
    fn lookup(&self, extension: &str) -> Option<&str> {
        LuceneFileExtension::from_extension(extension).map(|ext| ext.description())
    }
}

/// Key under which a segment file's size is accumulated: its extension,
/// or the whole name when it has none (`segments_5`).
pub fn file_key(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((_, extension)) => extension,
        None => file_name,
    }
}
