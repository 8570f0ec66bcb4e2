//! The 128-byte profile header.
use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::fixed::{from_s15_fixed16, read_u16, read_u32, to_s15_fixed16};
use crate::{Error, Result, Signature};

pub const HEADER_SIZE: usize = 128;

const ACSP: Signature = Signature::new(b"acsp");

macro_rules! define_signature_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident = $sig:literal => $desc:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
            Other(Signature),
        }

        impl $name {
            pub const KNOWN: &'static [Self] = &[$(Self::$variant,)*];

            pub fn from_signature(signature: Signature) -> Self {
                match &signature.0 {
                    $($sig => Self::$variant,)*
                    _ => Self::Other(signature),
                }
            }

            pub fn signature(self) -> Signature {
                match self {
                    $(Self::$variant => Signature::new($sig),)*
                    Self::Other(signature) => signature,
                }
            }

            pub fn description(self) -> &'static str {
                match self {
                    $(Self::$variant => $desc,)*
                    Self::Other(_) => "Unknown",
                }
            }

            fn parse_text(text: &str) -> Result<Self> {
                parse_choice(text, Self::KNOWN, Self::description, Self::signature)
                    .map(Self::from_signature)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.signature())
            }
        }
    };
}

define_signature_enum! {
    /// Profile/device class.
    pub enum DeviceClass {
        Input = b"scnr" => "Input device (scanner)",
        Display = b"mntr" => "Display device",
        Output = b"prtr" => "Output device (printer)",
        DeviceLink = b"link" => "DeviceLink",
        ColorSpace = b"spac" => "ColorSpace",
        Abstract = b"abst" => "Abstract",
        NamedColor = b"nmcl" => "NamedColor",
    }
}

define_signature_enum! {
    /// Data color space of the device side.
    pub enum DataColorSpace {
        Xyz = b"XYZ " => "nCIEXYZ",
        Lab = b"Lab " => "CIELAB",
        Luv = b"Luv " => "CIELUV",
        YCbCr = b"YCbr" => "YCbCr",
        Yxy = b"Yxy " => "Yxy",
        Rgb = b"RGB " => "RGB",
        Gray = b"GRAY" => "Gray",
        Hsv = b"HSV " => "HSV",
        Hls = b"HLS " => "HLS",
        Cmyk = b"CMYK" => "CMYK",
        Cmy = b"CMY " => "CMY",
        Color2 = b"2CLR" => "2 color",
        Color3 = b"3CLR" => "3 color (other than those listed above)",
        Color4 = b"4CLR" => "4 color (other than CMYK)",
        Color5 = b"5CLR" => "5 color",
        Color6 = b"6CLR" => "6 color",
        Color7 = b"7CLR" => "7 color",
        Color8 = b"8CLR" => "8 color",
        Color9 = b"9CLR" => "9 color",
        Color10 = b"ACLR" => "10 color",
        Color11 = b"BCLR" => "11 color",
        Color12 = b"CCLR" => "12 color",
        Color13 = b"DCLR" => "13 color",
        Color14 = b"ECLR" => "14 color",
        Color15 = b"FCLR" => "15 color",
    }
}

define_signature_enum! {
    /// Profile connection space.
    pub enum Pcs {
        Xyz = b"XYZ " => "PCSXYZ",
        Lab = b"Lab " => "PCSLAB",
    }
}

define_signature_enum! {
    /// Primary platform the profile was created for.
    pub enum Platform {
        Unspecified = b"\0\0\0\0" => "Empty (zero)",
        Apple = b"APPL" => "Apple",
        Microsoft = b"MSFT" => "Microsoft",
        SiliconGraphics = b"SGI " => "Silicon Graphics",
        SunMicrosystems = b"SUNW" => "Sun Microsystems",
    }
}

fn parse_choice<T: Copy>(
    text: &str,
    known: &[T],
    description: impl Fn(T) -> &'static str,
    signature: impl Fn(T) -> Signature,
) -> Result<Signature> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with("0000") {
        return Ok(Signature::ZERO);
    }
    if let Some(&v) = known
        .iter()
        .find(|&&v| description(v).eq_ignore_ascii_case(trimmed))
    {
        return Ok(signature(v));
    }

    // Accepts "mntr" as well as list-style "mntr - Display device".
    let head: String = text.trim_start().chars().take(4).collect();
    Signature::parse_limited(&head)
}

/// Encoded profile version (`major.minor.bugfix`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProfileVersion(pub u32);

impl ProfileVersion {
    pub const V4_4: Self = Self::new(4, 4, 0);

    pub const fn new(major: u8, minor: u8, bugfix: u8) -> Self {
        Self(((major as u32) << 24) | (((minor & 0xf) as u32) << 20) | (((bugfix & 0xf) as u32) << 16))
    }

    #[inline]
    pub fn major(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub fn minor(self) -> u8 {
        ((self.0 >> 20) & 0xf) as u8
    }

    #[inline]
    pub fn bugfix(self) -> u8 {
        ((self.0 >> 16) & 0xf) as u8
    }
}

impl std::fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())?;
        if self.bugfix() != 0 {
            write!(f, "{}", self.bugfix())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ProfileVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let err = || Error::invalid_header_field("version", "version must be like 4.4 or 4.31");

        let s = s.trim();
        let (major, rest) = s.split_once('.').unwrap_or((s, ""));
        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let major: u8 = major.parse().map_err(|_| err())?;

        let digits = rest.as_bytes();
        if s.contains('.') && digits.is_empty() {
            return Err(err());
        }
        if digits.len() > 2 || !digits.iter().all(u8::is_ascii_digit) {
            return Err(err());
        }
        let minor = digits.first().map(|d| d - b'0').unwrap_or(0);
        let bugfix = digits.get(1).map(|d| d - b'0').unwrap_or(0);
        Ok(Self::new(major, minor, bugfix))
    }
}

/// `dateTimeNumber`, six big-endian `u16` values.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct DateTimeNumber {
    pub year: u16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl DateTimeNumber {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self::from_naive(chrono::Utc::now().naive_utc())
    }

    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year().clamp(0, u16::MAX as i32) as u16,
            month: dt.month() as u16,
            day: dt.day() as u16,
            hour: dt.hour() as u16,
            minute: dt.minute() as u16,
            second: dt.second() as u16,
        }
    }

    fn parse_bytes(bytes: &[u8]) -> Self {
        let v = |idx: usize| read_u16(bytes, idx * 2).unwrap_or(0);
        Self {
            year: v(0),
            month: v(1),
            day: v(2),
            hour: v(3),
            minute: v(4),
            second: v(5),
        }
    }

    fn to_bytes(self) -> [u8; 12] {
        let mut out = [0u8; 12];
        let values = [
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        ];
        for (chunk, v) in out.chunks_exact_mut(2).zip(values) {
            chunk.copy_from_slice(&v.to_be_bytes());
        }
        out
    }
}

impl std::fmt::Display for DateTimeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl std::str::FromStr for DateTimeNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let dt = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S").map_err(|_| {
            Error::invalid_header_field("date_time", "date must be YYYY-MM-DD HH:MM:SS")
        })?;
        Ok(Self::from_naive(dt))
    }
}

/// Profile flags. Bits other than the two ICC-defined ones are preserved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ProfileFlags(pub u32);

impl ProfileFlags {
    const EMBEDDED: u32 = 0x1;
    const NOT_INDEPENDENT: u32 = 0x2;

    #[inline]
    pub fn embedded(self) -> bool {
        self.0 & Self::EMBEDDED != 0
    }

    #[inline]
    pub fn independent(self) -> bool {
        self.0 & Self::NOT_INDEPENDENT == 0
    }

    pub fn set_embedded(&mut self, embedded: bool) {
        set_bit(&mut self.0, Self::EMBEDDED, embedded);
    }

    pub fn set_independent(&mut self, independent: bool) {
        set_bit(&mut self.0, Self::NOT_INDEPENDENT, !independent);
    }
}

impl std::fmt::Display for ProfileFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let embedded = if self.embedded() { "Embedded" } else { "Not embedded" };
        let independent = if self.independent() {
            "Independent"
        } else {
            "Not independent"
        };
        write!(f, "{embedded}, {independent}")
    }
}

impl std::str::FromStr for ProfileFlags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut flags = Self(0);
        for token in s.split(',').map(normalize_token).filter(|t| !t.is_empty()) {
            match &*token {
                "embedded" => flags.set_embedded(true),
                "not embedded" => flags.set_embedded(false),
                "independent" => flags.set_independent(true),
                "not independent" => flags.set_independent(false),
                _ => {
                    return Err(Error::invalid_header_field(
                        "flags",
                        format!("unknown flag `{}`", token.trim()),
                    ));
                }
            }
        }
        Ok(flags)
    }
}

/// Device attributes. Bits other than the four ICC-defined ones are preserved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct DeviceAttributes(pub u64);

impl DeviceAttributes {
    const TRANSPARENCY: u64 = 0x1;
    const MATTE: u64 = 0x2;
    const NEGATIVE: u64 = 0x4;
    const BLACK_AND_WHITE: u64 = 0x8;

    #[inline]
    pub fn transparency(self) -> bool {
        self.0 & Self::TRANSPARENCY != 0
    }

    #[inline]
    pub fn matte(self) -> bool {
        self.0 & Self::MATTE != 0
    }

    #[inline]
    pub fn negative(self) -> bool {
        self.0 & Self::NEGATIVE != 0
    }

    #[inline]
    pub fn black_and_white(self) -> bool {
        self.0 & Self::BLACK_AND_WHITE != 0
    }
}

impl std::fmt::Display for DeviceAttributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            if self.transparency() { "Transparency" } else { "Reflective" },
            if self.matte() { "Matte" } else { "Glossy" },
            if self.negative() { "Negative" } else { "Positive" },
            if self.black_and_white() { "Black & White" } else { "Color" },
        )
    }
}

impl std::str::FromStr for DeviceAttributes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut value = 0u64;
        for token in s.split(',').map(normalize_token).filter(|t| !t.is_empty()) {
            let (bit, on) = match &*token {
                "reflective" => (Self::TRANSPARENCY, false),
                "transparency" | "transparent" => (Self::TRANSPARENCY, true),
                "glossy" => (Self::MATTE, false),
                "matte" => (Self::MATTE, true),
                "positive" => (Self::NEGATIVE, false),
                "negative" => (Self::NEGATIVE, true),
                "color" | "colour" => (Self::BLACK_AND_WHITE, false),
                "black & white" | "black and white" | "bw" => (Self::BLACK_AND_WHITE, true),
                _ => {
                    return Err(Error::invalid_header_field(
                        "attributes",
                        format!("unknown attribute `{}`", token.trim()),
                    ));
                }
            };
            set_bit(&mut value, bit, on);
        }
        Ok(Self(value))
    }
}

fn normalize_token(token: &str) -> String {
    token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

#[inline]
fn set_bit<T>(value: &mut T, bit: T, on: bool)
where
    T: Copy + std::ops::BitOr<Output = T> + std::ops::BitAnd<Output = T> + std::ops::Not<Output = T>,
{
    *value = if on { *value | bit } else { *value & !bit };
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RenderingIntent {
    Perceptual,
    #[default]
    Relative,
    Saturation,
    Absolute,
    /// Value outside 0-3, kept so the header can be inspected and repaired.
    Other(u32),
}

impl RenderingIntent {
    pub const ALL: [Self; 4] = [
        Self::Perceptual,
        Self::Relative,
        Self::Saturation,
        Self::Absolute,
    ];

    /// Known intent for `value`, `None` outside 0-3.
    pub fn from_u32(value: u32) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    pub fn from_raw(value: u32) -> Self {
        Self::from_u32(value).unwrap_or(Self::Other(value))
    }

    pub fn to_u32(self) -> u32 {
        match self {
            Self::Perceptual => 0,
            Self::Relative => 1,
            Self::Saturation => 2,
            Self::Absolute => 3,
            Self::Other(value) => value,
        }
    }

    #[inline]
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Perceptual => "Perceptual",
            Self::Relative => "Media-relative colorimetric",
            Self::Saturation => "Saturation",
            Self::Absolute => "ICC-absolute colorimetric",
            Self::Other(_) => "Unknown",
        }
    }
}

impl std::fmt::Display for RenderingIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Other(value) => write!(f, "Unknown ({value})"),
            _ => f.write_str(self.description()),
        }
    }
}

impl std::str::FromStr for RenderingIntent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let err = || Error::invalid_header_field("rendering_intent", "rendering intent must be 0-3");

        let s = s.trim();
        // Either a bare number or `N - description`.
        let digits_len = s.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len > 0 {
            let rest = s[digits_len..].trim_start();
            if !rest.is_empty() && !rest.starts_with('-') {
                return Err(err());
            }
            let value = s[..digits_len].parse::<u32>().map_err(|_| err())?;
            return Self::from_u32(value).ok_or_else(err);
        }

        let lowercase = s.to_ascii_lowercase();
        Ok(match &*lowercase {
            "perceptual" | "per" => Self::Perceptual,
            "relative" | "rel" | "relative_colorimetric" => Self::Relative,
            "saturation" | "sat" => Self::Saturation,
            "absolute" | "abs" | "absolute_colorimetric" => Self::Absolute,
            _ => Self::ALL
                .into_iter()
                .find(|intent| intent.description().eq_ignore_ascii_case(s))
                .ok_or_else(err)?,
        })
    }
}

/// `XYZNumber`, kept in its encoded s15Fixed16 form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct XyzNumber(pub [i32; 3]);

impl XyzNumber {
    /// PCS illuminant D50 as stored in the header.
    pub const D50: Self = Self([0xf6d6, 0x10000, 0xd32d]);

    pub fn from_f64(xyz: [f64; 3]) -> Result<Self> {
        Ok(Self([
            to_s15_fixed16(xyz[0])?,
            to_s15_fixed16(xyz[1])?,
            to_s15_fixed16(xyz[2])?,
        ]))
    }

    #[inline]
    pub fn to_f64(self) -> [f64; 3] {
        self.0.map(from_s15_fixed16)
    }

    pub(crate) fn parse_bytes(bytes: &[u8]) -> Option<Self> {
        let v = |idx: usize| crate::fixed::read_i32(bytes, idx * 4);
        Some(Self([v(0)?, v(1)?, v(2)?]))
    }

    pub(crate) fn to_bytes(self) -> [u8; 12] {
        let mut out = [0u8; 12];
        for (chunk, v) in out.chunks_exact_mut(4).zip(self.0) {
            chunk.copy_from_slice(&v.to_be_bytes());
        }
        out
    }
}

impl std::fmt::Display for XyzNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, z] = self.to_f64();
        write!(f, "{x:.5},{y:.5},{z:.5}")
    }
}

impl std::str::FromStr for XyzNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let err = || {
            Error::invalid_header_field("illuminant", "XYZ needs three values like 0.9642,1.0000,0.8249")
        };

        let values = s
            .split([' ', ','])
            .filter(|v| !v.is_empty())
            .map(|v| v.parse::<f64>().map_err(|_| err()))
            .collect::<Result<Vec<_>>>()?;
        let &[x, y, z] = values.as_slice() else {
            return Err(err());
        };
        Self::from_f64([x, y, z])
    }
}

/// Header fields in file order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HeaderField {
    Size,
    CmmType,
    Version,
    DeviceClass,
    ColorSpace,
    Pcs,
    DateTime,
    Acsp,
    Platform,
    Flags,
    Manufacturer,
    Model,
    Attributes,
    RenderingIntent,
    Illuminant,
    Creator,
    ProfileId,
    Reserved,
}

impl HeaderField {
    pub const ALL: [Self; 18] = [
        Self::Size,
        Self::CmmType,
        Self::Version,
        Self::DeviceClass,
        Self::ColorSpace,
        Self::Pcs,
        Self::DateTime,
        Self::Acsp,
        Self::Platform,
        Self::Flags,
        Self::Manufacturer,
        Self::Model,
        Self::Attributes,
        Self::RenderingIntent,
        Self::Illuminant,
        Self::Creator,
        Self::ProfileId,
        Self::Reserved,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::CmmType => "cmm_type",
            Self::Version => "version",
            Self::DeviceClass => "device_class",
            Self::ColorSpace => "color_space",
            Self::Pcs => "pcs",
            Self::DateTime => "date_time",
            Self::Acsp => "acsp",
            Self::Platform => "platform",
            Self::Flags => "flags",
            Self::Manufacturer => "manufacturer",
            Self::Model => "model",
            Self::Attributes => "attributes",
            Self::RenderingIntent => "rendering_intent",
            Self::Illuminant => "illuminant",
            Self::Creator => "creator",
            Self::ProfileId => "profile_id",
            Self::Reserved => "reserved",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Size => "Profile size (bytes)",
            Self::CmmType => "CMM type",
            Self::Version => "ICC version",
            Self::DeviceClass => "Device class",
            Self::ColorSpace => "Color space",
            Self::Pcs => "PCS",
            Self::DateTime => "Creation date",
            Self::Acsp => "acsp signature",
            Self::Platform => "Platform",
            Self::Flags => "Flags",
            Self::Manufacturer => "Manufacturer",
            Self::Model => "Model",
            Self::Attributes => "Device attributes",
            Self::RenderingIntent => "Rendering intent",
            Self::Illuminant => "Illuminant (XYZ)",
            Self::Creator => "Profile creator",
            Self::ProfileId => "Profile ID",
            Self::Reserved => "Reserved",
        }
    }

    pub fn len(self) -> usize {
        match self {
            Self::DateTime | Self::Illuminant => 12,
            Self::Attributes => 8,
            Self::ProfileId => 16,
            Self::Reserved => 28,
            _ => 4,
        }
    }

    pub fn offset(self) -> usize {
        Self::ALL
            .iter()
            .take_while(|&&field| field != self)
            .map(|field| field.len())
            .sum()
    }

    /// Whether the writer recomputes this field on every save.
    pub fn is_managed(self) -> bool {
        matches!(self, Self::Size | Self::DateTime | Self::ProfileId)
    }
}

impl std::fmt::Display for HeaderField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for HeaderField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowercase = s.trim().to_ascii_lowercase().replace('-', "_");
        Ok(match &*lowercase {
            "size" => Self::Size,
            "cmm_type" | "cmm" => Self::CmmType,
            "version" => Self::Version,
            "device_class" | "class" => Self::DeviceClass,
            "color_space" | "colour_space" | "colorspace" => Self::ColorSpace,
            "pcs" => Self::Pcs,
            "date_time" | "date" => Self::DateTime,
            "acsp" => Self::Acsp,
            "platform" => Self::Platform,
            "flags" => Self::Flags,
            "manufacturer" => Self::Manufacturer,
            "model" => Self::Model,
            "attributes" => Self::Attributes,
            "rendering_intent" | "intent" => Self::RenderingIntent,
            "illuminant" => Self::Illuminant,
            "creator" => Self::Creator,
            "profile_id" | "id" => Self::ProfileId,
            "reserved" => Self::Reserved,
            _ => return Err(Error::UnknownHeaderField(s.to_owned())),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileHeader {
    pub size: u32,
    pub cmm_type: Signature,
    pub version: ProfileVersion,
    pub device_class: DeviceClass,
    pub color_space: DataColorSpace,
    pub pcs: Pcs,
    pub date_time: DateTimeNumber,
    pub platform: Platform,
    pub flags: ProfileFlags,
    pub manufacturer: Signature,
    pub model: Signature,
    pub attributes: DeviceAttributes,
    pub rendering_intent: RenderingIntent,
    pub illuminant: XyzNumber,
    pub creator: Signature,
    pub profile_id: [u8; 16],
    pub reserved: [u8; 28],
}

impl Default for ProfileHeader {
    fn default() -> Self {
        Self {
            size: 0,
            cmm_type: Signature::new(b"SICC"),
            version: ProfileVersion::V4_4,
            device_class: DeviceClass::Display,
            color_space: DataColorSpace::Rgb,
            pcs: Pcs::Xyz,
            date_time: DateTimeNumber::now(),
            platform: Platform::Microsoft,
            flags: ProfileFlags(0),
            manufacturer: Signature::ZERO,
            model: Signature::ZERO,
            attributes: DeviceAttributes(1),
            rendering_intent: RenderingIntent::Relative,
            illuminant: XyzNumber::D50,
            creator: Signature::new(b"MSFT"),
            profile_id: [0; 16],
            reserved: [0; 28],
        }
    }
}

impl ProfileHeader {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let Some(bytes) = bytes.get(..HEADER_SIZE) else {
            return Err(Error::ProfileTooShort { len: bytes.len() });
        };
        let sig = |offset: usize| {
            Signature([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };
        let u32_at = |field: HeaderField| read_u32(bytes, field.offset()).unwrap_or(0);

        if sig(HeaderField::Acsp.offset()) != ACSP {
            return Err(Error::MissingAcsp);
        }

        let rendering_intent = RenderingIntent::from_raw(u32_at(HeaderField::RenderingIntent));

        let attributes_offset = HeaderField::Attributes.offset();
        let attributes = u64::from_be_bytes(
            bytes[attributes_offset..attributes_offset + 8]
                .try_into()
                .map_err(|_| Error::ProfileTooShort { len: bytes.len() })?,
        );

        let date_offset = HeaderField::DateTime.offset();
        let illuminant_offset = HeaderField::Illuminant.offset();
        let id_offset = HeaderField::ProfileId.offset();
        let reserved_offset = HeaderField::Reserved.offset();

        let mut profile_id = [0u8; 16];
        profile_id.copy_from_slice(&bytes[id_offset..id_offset + 16]);
        let mut reserved = [0u8; 28];
        reserved.copy_from_slice(&bytes[reserved_offset..reserved_offset + 28]);

        Ok(Self {
            size: u32_at(HeaderField::Size),
            cmm_type: sig(HeaderField::CmmType.offset()),
            version: ProfileVersion(u32_at(HeaderField::Version)),
            device_class: DeviceClass::from_signature(sig(HeaderField::DeviceClass.offset())),
            color_space: DataColorSpace::from_signature(sig(HeaderField::ColorSpace.offset())),
            pcs: Pcs::from_signature(sig(HeaderField::Pcs.offset())),
            date_time: DateTimeNumber::parse_bytes(&bytes[date_offset..date_offset + 12]),
            platform: Platform::from_signature(sig(HeaderField::Platform.offset())),
            flags: ProfileFlags(u32_at(HeaderField::Flags)),
            manufacturer: sig(HeaderField::Manufacturer.offset()),
            model: sig(HeaderField::Model.offset()),
            attributes: DeviceAttributes(attributes),
            rendering_intent,
            illuminant: XyzNumber::parse_bytes(&bytes[illuminant_offset..illuminant_offset + 12])
                .unwrap_or_default(),
            creator: sig(HeaderField::Creator.offset()),
            profile_id,
            reserved,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = Vec::with_capacity(HEADER_SIZE);
        out.extend_from_slice(&self.size.to_be_bytes());
        out.extend_from_slice(self.cmm_type.as_bytes());
        out.extend_from_slice(&self.version.0.to_be_bytes());
        out.extend_from_slice(self.device_class.signature().as_bytes());
        out.extend_from_slice(self.color_space.signature().as_bytes());
        out.extend_from_slice(self.pcs.signature().as_bytes());
        out.extend_from_slice(&self.date_time.to_bytes());
        out.extend_from_slice(ACSP.as_bytes());
        out.extend_from_slice(self.platform.signature().as_bytes());
        out.extend_from_slice(&self.flags.0.to_be_bytes());
        out.extend_from_slice(self.manufacturer.as_bytes());
        out.extend_from_slice(self.model.as_bytes());
        out.extend_from_slice(&self.attributes.0.to_be_bytes());
        out.extend_from_slice(&self.rendering_intent.to_u32().to_be_bytes());
        out.extend_from_slice(&self.illuminant.to_bytes());
        out.extend_from_slice(self.creator.as_bytes());
        out.extend_from_slice(&self.profile_id);
        out.extend_from_slice(&self.reserved);

        let mut header = [0u8; HEADER_SIZE];
        header.copy_from_slice(&out);
        header
    }

    /// Renders a field as human readable text.
    pub fn field_text(&self, field: HeaderField) -> String {
        match field {
            HeaderField::Size => self.size.to_string(),
            HeaderField::CmmType => self.cmm_type.to_string(),
            HeaderField::Version => self.version.to_string(),
            HeaderField::DeviceClass => self.device_class.to_string(),
            HeaderField::ColorSpace => self.color_space.to_string(),
            HeaderField::Pcs => self.pcs.to_string(),
            HeaderField::DateTime => self.date_time.to_string(),
            HeaderField::Acsp => ACSP.to_string(),
            HeaderField::Platform => self.platform.to_string(),
            HeaderField::Flags => self.flags.to_string(),
            HeaderField::Manufacturer => self.manufacturer.to_string(),
            HeaderField::Model => self.model.to_string(),
            HeaderField::Attributes => self.attributes.to_string(),
            HeaderField::RenderingIntent => self.rendering_intent.to_string(),
            HeaderField::Illuminant => self.illuminant.to_string(),
            HeaderField::Creator => self.creator.to_string(),
            HeaderField::ProfileId | HeaderField::Reserved => self.field_hex(field),
        }
    }

    /// Renders a field as uppercase hex of its encoded bytes.
    pub fn field_hex(&self, field: HeaderField) -> String {
        let bytes = self.to_bytes();
        let offset = field.offset();
        crate::hexview::to_hex(&bytes[offset..offset + field.len()])
    }

    /// Sets a field from human readable text.
    ///
    /// Fields maintained by the writer (`size`, `date_time`, `profile_id`) and the fixed `acsp`
    /// signature are rejected.
    pub fn set_field(&mut self, field: HeaderField, text: &str) -> Result<()> {
        match field {
            HeaderField::Size | HeaderField::DateTime | HeaderField::ProfileId => {
                return Err(Error::invalid_header_field(
                    field.key(),
                    "field is updated automatically when the profile is written",
                ));
            }
            HeaderField::Acsp => {
                return Err(Error::invalid_header_field("acsp", "signature is fixed"));
            }
            HeaderField::CmmType => self.cmm_type = Signature::parse_limited(text)?,
            HeaderField::Version => self.version = text.parse()?,
            HeaderField::DeviceClass => self.device_class = DeviceClass::parse_text(text)?,
            HeaderField::ColorSpace => self.color_space = DataColorSpace::parse_text(text)?,
            HeaderField::Pcs => self.pcs = Pcs::parse_text(text)?,
            HeaderField::Platform => self.platform = Platform::parse_text(text)?,
            HeaderField::Flags => {
                let parsed: ProfileFlags = text.parse()?;
                // Vendor bits survive a text edit.
                self.flags = ProfileFlags((self.flags.0 & !0x3) | parsed.0);
            }
            HeaderField::Manufacturer => self.manufacturer = Signature::parse_limited(text)?,
            HeaderField::Model => self.model = Signature::parse_limited(text)?,
            HeaderField::Attributes => {
                let parsed: DeviceAttributes = text.parse()?;
                self.attributes = DeviceAttributes((self.attributes.0 & !0xf) | parsed.0);
            }
            HeaderField::RenderingIntent => self.rendering_intent = text.parse()?,
            HeaderField::Illuminant => self.illuminant = text.parse()?,
            HeaderField::Creator => self.creator = Signature::parse_limited(text)?,
            HeaderField::Reserved => {
                let bytes = normalize_hex(field, text);
                self.reserved.copy_from_slice(&bytes);
            }
        }
        Ok(())
    }

    /// Sets a field from raw hex.
    ///
    /// Non-hex characters are ignored; the value is right-padded with zeros and truncated to
    /// the field length.
    pub fn set_field_hex(&mut self, field: HeaderField, hex: &str) -> Result<()> {
        let value = normalize_hex(field, hex);
        let mut bytes = self.to_bytes();
        let offset = field.offset();
        bytes[offset..offset + field.len()].copy_from_slice(&value);
        *self = Self::parse(&bytes)?;
        Ok(())
    }
}

fn normalize_hex(field: HeaderField, hex: &str) -> Vec<u8> {
    let mut digits: Vec<u8> = hex
        .bytes()
        .filter(u8::is_ascii_hexdigit)
        .take(field.len() * 2)
        .collect();
    digits.resize(field.len() * 2, b'0');
    digits
        .chunks_exact(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16).unwrap_or(0) as u8;
            let lo = (pair[1] as char).to_digit(16).unwrap_or(0) as u8;
            (hi << 4) | lo
        })
        .collect()
}
