//! 上传的学习材料
//!
//! 文件字节 + 声明的 MIME 类型，随提示词一起发给模型

use crate::error::{AppError, AppResult, FileError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// 支持的上传文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadKind {
    /// PNG 图片
    Png,
    /// JPG 图片
    Jpg,
    /// JPEG 图片
    Jpeg,
    /// PDF 文档
    Pdf,
    /// 纯文本
    Txt,
    /// MP3 音频
    Mp3,
    /// WAV 音频
    Wav,
    /// MP4 视频
    Mp4,
}

impl UploadKind {
    /// 获取 MIME 类型
    pub fn mime_type(self) -> &'static str {
        match self {
            UploadKind::Png => "image/png",
            UploadKind::Jpg => "image/jpeg",
            UploadKind::Jpeg => "image/jpeg",
            UploadKind::Pdf => "application/pdf",
            UploadKind::Txt => "text/plain",
            UploadKind::Mp3 => "audio/mpeg",
            UploadKind::Wav => "audio/wav",
            UploadKind::Mp4 => "video/mp4",
        }
    }

    /// 从文件扩展名解析类型
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(UploadKind::Png),
            "jpg" => Some(UploadKind::Jpg),
            "jpeg" => Some(UploadKind::Jpeg),
            "pdf" => Some(UploadKind::Pdf),
            "txt" => Some(UploadKind::Txt),
            "mp3" => Some(UploadKind::Mp3),
            "wav" => Some(UploadKind::Wav),
            "mp4" => Some(UploadKind::Mp4),
            _ => None,
        }
    }
}

/// 上传的学习材料
#[derive(Debug, Clone)]
pub struct Attachment {
    /// 文件名（仅用于显示）
    pub file_name: String,
    /// 声明的 MIME 类型
    pub mime_type: String,
    /// 文件字节
    pub data: Vec<u8>,
}

impl Attachment {
    /// 创建新的学习材料
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// 从文件路径加载学习材料
    ///
    /// 只接受白名单内的扩展名（png / jpg / jpeg / pdf / txt / mp3 / wav / mp4）
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        if !path.exists() {
            return Err(AppError::File(FileError::NotFound { path: path_str }));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();

        let kind = UploadKind::from_extension(&extension)
            .ok_or_else(|| AppError::unsupported_file_type(&path_str, &extension))?;

        let data = std::fs::read(path).map_err(|e| AppError::file_read_failed(&path_str, e))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        Ok(Self::new(file_name, kind.mime_type(), data))
    }

    /// 是否是纯文本材料
    ///
    /// 纯文本直接嵌入提示词，其余类型作为内联二进制数据发送
    pub fn is_text(&self) -> bool {
        self.mime_type == "text/plain"
    }

    /// 解码为 UTF-8 文本（仅对纯文本材料有意义）
    pub fn text_content(&self) -> String {
        String::from_utf8_lossy(&self.data).to_string()
    }

    /// 编码为 base64（发送给模型的内联数据格式）
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_kind_from_extension() {
        assert_eq!(UploadKind::from_extension("pdf"), Some(UploadKind::Pdf));
        assert_eq!(UploadKind::from_extension("PNG"), Some(UploadKind::Png));
        assert_eq!(UploadKind::from_extension("txt"), Some(UploadKind::Txt));
        assert_eq!(UploadKind::from_extension("docx"), None);
        assert_eq!(UploadKind::from_extension(""), None);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(UploadKind::Jpg.mime_type(), "image/jpeg");
        assert_eq!(UploadKind::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(UploadKind::Txt.mime_type(), "text/plain");
        assert_eq!(UploadKind::Mp4.mime_type(), "video/mp4");
    }

    #[test]
    fn test_text_content() {
        let attachment = Attachment::new(
            "syllabus.txt",
            "text/plain",
            "Exam on Oct 5".as_bytes().to_vec(),
        );
        assert!(attachment.is_text());
        assert_eq!(attachment.text_content(), "Exam on Oct 5");
    }

    #[test]
    fn test_base64_encoding() {
        let attachment = Attachment::new("a.png", "image/png", vec![0x41, 0x42, 0x43]);
        assert!(!attachment.is_text());
        assert_eq!(attachment.to_base64(), "QUJD");
    }
}
