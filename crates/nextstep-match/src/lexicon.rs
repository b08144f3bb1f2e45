//! Per-category keyword lists used by the keyword classifier.
//!
//! Entries may carry accents or mixed case; they are normalized once when a
//! classifier is built. Multi-word entries and entries in unspaced scripts
//! are matched as phrases, single words as whole terms (or term prefixes
//! when at least four characters long).
//! Languages: English, Spanish, Vietnamese, Chinese, Arabic.

use nextstep_core::types::Category;

pub fn keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Food => &[
            "food", "groceries", "grocery", "meal", "meals", "hungry", "hunger", "pantry", "snap",
            "food bank", "food stamps", "nutrition",
            "comida", "alimentos", "hambre", "despensa", "comer",
            "thức ăn", "thực phẩm", "đói",
            "食物", "食品", "饿",
            "طعام", "أكل", "جوع",
        ],
        Category::MentalHealth => &[
            "mental", "mental health", "depression", "depressed", "anxiety", "anxious", "stress",
            "counseling", "counselor", "therapy", "therapist", "suicide", "suicidal", "psychiatrist",
            "salud mental", "depresión", "ansiedad", "terapia", "suicidio",
            "tâm lý", "trầm cảm", "lo âu",
            "心理", "抑郁", "焦虑",
            "نفسي", "اكتئاب", "قلق",
        ],
        Category::Healthcare => &[
            "doctor", "clinic", "hospital", "medical", "medicine", "sick", "checkup", "nurse",
            "vaccine", "vaccines", "prescription", "health insurance",
            "médico", "clínica", "enfermo", "salud", "medicina", "vacuna",
            "bác sĩ", "phòng khám", "bệnh viện", "thuốc",
            "医生", "医院", "诊所", "看病",
            "طبيب", "مستشفى", "عيادة", "دواء",
        ],
        Category::Housing => &[
            "housing", "house", "shelter", "homeless", "rent", "eviction", "evicted", "apartment",
            "place to stay", "sleep tonight",
            "vivienda", "refugio", "alquiler", "renta", "desalojo", "casa",
            "nhà ở", "vô gia cư", "tiền nhà",
            "住房", "住所", "无家可归", "房租",
            "سكن", "مأوى", "إيجار",
        ],
        Category::SubstanceAbuse => &[
            "substance", "substance abuse", "addiction", "addicted", "drug", "drugs", "alcohol",
            "alcoholic", "drinking", "rehab", "detox", "overdose", "sober", "opioid",
            "adicción", "drogas", "alcoholismo", "rehabilitación",
            "cai nghiện", "ma túy", "nghiện",
            "戒毒", "毒品", "酗酒",
            "إدمان", "مخدرات", "كحول",
        ],
        Category::Dental => &[
            "dentist", "dental", "teeth", "tooth", "toothache", "gums", "cavity",
            "dentista", "dientes", "muela", "diente",
            "nha sĩ", "đau răng", "nha khoa",
            "牙医", "牙齿", "牙痛",
            "أسنان", "طبيب أسنان",
        ],
        Category::Vision => &[
            "eye", "eyes", "vision", "glasses", "eyeglasses", "optometrist", "blind", "contacts",
            "lentes", "anteojos", "ojos", "vista",
            "mắt kính", "kính mắt", "khám mắt",
            "眼镜", "眼睛", "视力",
            "نظارات", "عيون", "نظر",
        ],
        Category::Transportation => &[
            "bus", "ride", "rides", "transportation", "transport", "transit", "train", "rail",
            "metro", "taxi", "fare",
            "autobús", "transporte", "camión", "pasaje",
            "xe buýt", "đi lại", "phương tiện",
            "公交", "交通", "巴士",
            "مواصلات", "حافلة", "نقل",
        ],
        Category::Education => &[
            "school", "class", "classes", "ged", "english", "literacy", "college", "tutoring",
            "education", "learn", "diploma",
            "escuela", "clases", "educación", "inglés", "aprender",
            "trường", "lớp học", "học tiếng anh", "giáo dục",
            "学校", "教育", "英语", "上课",
            "مدرسة", "تعليم", "دروس",
        ],
        Category::Telecommunications => &[
            "phone", "cellphone", "cell phone", "telephone", "internet", "wifi", "lifeline",
            "teléfono", "celular", "internet gratis",
            "điện thoại", "mạng internet",
            "电话", "手机", "网络",
            "هاتف", "إنترنت", "جوال",
        ],
        Category::InterpersonalViolence => &[
            "abuse", "abused", "abuser", "domestic violence", "violence", "violent", "assault",
            "sexual assault", "beaten", "restraining order", "protective order", "rape",
            "trafficking", "stalking",
            "violencia", "abuso", "maltrato", "violencia doméstica",
            "bạo lực", "bạo hành", "xâm hại",
            "家暴", "暴力", "虐待",
            "عنف", "إساءة", "تحرش",
        ],
    }
}
